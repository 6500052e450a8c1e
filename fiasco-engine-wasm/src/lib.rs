//! WASM bindings for fiasco-engine: powers the in-browser table generator.

use wasm_bindgen::prelude::*;

use fiasco_engine::core::config::GeneratorConfig;
use fiasco_engine::core::loader;
use fiasco_engine::schema::playset::{is_relationships, Playset};
use fiasco_engine::{PairingStrategy, SectionChoice, Setup};

// ---------------------------------------------------------------------------
// Embedded playset, compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const LAKESIDE_MOTEL: &str = include_str!("../../playsets/lakeside_motel.txt");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct GenerateOptions {
    pairing: Option<String>,
    sections: Option<String>,
    seed: Option<u64>,
}

#[derive(serde::Serialize)]
struct SectionInfo {
    name: String,
    role: &'static str,
    categories: Vec<String>,
    items: usize,
}

fn parse_options(options_json: &str) -> Result<GeneratorConfig, String> {
    let options: GenerateOptions = if options_json.trim().is_empty() {
        GenerateOptions::default()
    } else {
        serde_json::from_str(options_json).map_err(|e| format!("Invalid options JSON: {e}"))?
    };

    let mut config = GeneratorConfig {
        seed: options.seed,
        ..GeneratorConfig::default()
    };
    if let Some(ref name) = options.pairing {
        config.pairing = name.parse::<PairingStrategy>().map_err(|e| e.to_string())?;
    }
    if let Some(ref name) = options.sections {
        config.section_choice = name.parse::<SectionChoice>().map_err(|e| e.to_string())?;
    }
    Ok(config)
}

fn generate_json(
    playset: &Playset,
    participants_json: &str,
    options_json: &str,
) -> Result<String, String> {
    let participants: Vec<String> = serde_json::from_str(participants_json)
        .map_err(|e| format!("Invalid participants JSON: {e}"))?;
    let config = parse_options(options_json)?;
    let table = Setup::new(playset, &participants)
        .with_config(&config)
        .build()
        .map_err(|e| format!("Generation error: {e}"))?;
    serde_json::to_string(&table).map_err(|e| format!("Serialization error: {e}"))
}

fn sections_json(playset: &Playset) -> Result<String, String> {
    let sections: Vec<SectionInfo> = playset
        .sections()
        .map(|s| SectionInfo {
            name: s.name.clone(),
            role: if is_relationships(&s.name) {
                "relationships"
            } else {
                "details"
            },
            categories: s.categories().map(|c| c.name.clone()).collect(),
            items: s.item_count(),
        })
        .collect();
    serde_json::to_string(&sections).map_err(|e| format!("Serialization error: {e}"))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// A loaded playset, ready to generate tables from.
#[wasm_bindgen]
pub struct FiascoTable {
    playset: Playset,
}

#[wasm_bindgen]
impl FiascoTable {
    /// Parse playset text.
    #[wasm_bindgen(constructor)]
    pub fn new(playset_text: &str) -> Result<FiascoTable, JsError> {
        let playset = loader::parse_str(playset_text)
            .map_err(|e| JsError::new(&format!("Playset error: {e}")))?;
        Ok(FiascoTable { playset })
    }

    /// The bundled sample playset.
    pub fn sample() -> Result<FiascoTable, JsError> {
        Self::new(data::LAKESIDE_MOTEL)
    }

    pub fn name(&self) -> String {
        self.playset.name.clone()
    }

    /// JSON array describing each section and its categories.
    pub fn sections(&self) -> Result<String, JsError> {
        sections_json(&self.playset).map_err(|e| JsError::new(&e))
    }

    /// Generate a table.
    ///
    /// `participants_json` is a JSON array of names in seating order.
    /// `options_json` may be empty or look like:
    /// ```json
    /// { "pairing": "random-coverage", "sections": "round-robin", "seed": 42 }
    /// ```
    /// Returns a JSON array of connections.
    pub fn generate(&self, participants_json: &str, options_json: &str) -> Result<String, JsError> {
        generate_json(&self.playset, participants_json, options_json).map_err(|e| JsError::new(&e))
    }

    /// Return JSON array of pairing strategy names.
    pub fn pairing_strategies() -> String {
        serde_json::to_string(&["ring", "all-combinations", "random-coverage"])
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON array of section choice names.
    pub fn section_choices() -> String {
        serde_json::to_string(&["round-robin", "random"]).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Raw text of the bundled sample playset.
#[wasm_bindgen]
pub fn sample_playset() -> String {
    data::LAKESIDE_MOTEL.to_string()
}
