//! Config validation: unknown-key detection with Levenshtein suggestions
//! and economic range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for AnalysisConfig.
///
/// Entries of the `[[regions]]` array are reported as `regions.<field>`.
/// Any new field added to AnalysisConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        "seed",
        // [[regions]]
        "regions",
        "regions.name",
        "regions.path",
        // [economics]
        "economics",
        "economics.budget_usd",
        "economics.revenue_per_unit_usd",
        "economics.top_wells",
        "economics.max_loss_risk",
        // [bootstrap]
        "bootstrap",
        "bootstrap.iterations",
        "bootstrap.wells_per_sample",
        "bootstrap.confidence_level",
        // [model]
        "model",
        "model.validation_fraction",
        // [loader]
        "loader",
        "loader.skip_invalid_rows",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields
/// `["a", "a.b", "a.c"]`. Tables inside arrays share the array's path,
/// so `[[a]] b = 1` yields `["a", "a.b"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|i| i.is_table()) {
                        for key in walk_toml_keys(item, &path) {
                            if !keys.contains(&key) {
                                keys.push(key);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut candidates: Vec<&str> = known.iter().copied().collect();
    candidates.sort_unstable();

    let mut best: Option<(&str, usize)> = None;
    for k in candidates {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((k, dist)),
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate value ranges on a parsed AnalysisConfig.
///
/// Returns (errors, warnings). Errors are impossible values that must
/// prevent the run; warnings are suspicious but not fatal.
pub fn validate_ranges(config: &super::AnalysisConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let e = &config.economics;
    if e.budget_usd <= 0.0 {
        errors.push(format!(
            "economics.budget_usd = {:.2} must be > 0",
            e.budget_usd
        ));
    }
    if e.revenue_per_unit_usd <= 0.0 {
        errors.push(format!(
            "economics.revenue_per_unit_usd = {:.2} must be > 0 (used as divisor)",
            e.revenue_per_unit_usd
        ));
    }
    if e.max_loss_risk <= 0.0 || e.max_loss_risk > 1.0 {
        errors.push(format!(
            "economics.max_loss_risk = {:.4} is outside (0, 1]",
            e.max_loss_risk
        ));
    }

    let b = &config.bootstrap;
    if b.confidence_level <= 0.0 || b.confidence_level >= 1.0 {
        errors.push(format!(
            "bootstrap.confidence_level = {:.4} is outside (0, 1)",
            b.confidence_level
        ));
    }

    let vf = config.model.validation_fraction;
    if vf <= 0.0 || vf >= 1.0 {
        errors.push(format!(
            "model.validation_fraction = {vf:.4} is outside (0, 1)"
        ));
    }

    // Few resamples make the tails of the interval unreliable
    if b.iterations > 0 && b.iterations < 100 {
        warnings.push(ValidationWarning {
            field: "bootstrap.iterations".to_string(),
            message: format!(
                "bootstrap.iterations = {} is low; confidence bounds will be noisy",
                b.iterations
            ),
            suggestion: None,
        });
    }

    // A risk limit above 50% accepts regions that lose money more often than not
    if e.max_loss_risk > 0.5 && e.max_loss_risk <= 1.0 {
        warnings.push(ValidationWarning {
            field: "economics.max_loss_risk".to_string(),
            message: format!(
                "economics.max_loss_risk = {:.2} accepts regions that usually lose money",
                e.max_loss_risk
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
