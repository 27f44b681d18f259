//! Recommendations derived from detected issues and gaps

pub const EXPAND_CLAUSE: &str = "Expand clause with specific obligations, conditions, and timelines";
pub const USE_MANDATORY_LANGUAGE: &str =
    "Use mandatory language ('shall', 'must') instead of permissive language";
pub const SPECIFY_NOTICE_PERIOD: &str =
    "Specify exact notice period (e.g., '30 days written notice')";
pub const ADD_LIABILITY_CAP: &str = "Add limitation of liability clause with specific caps";

fn mentions(findings: &[String], needle: &str) -> bool {
    findings.iter().any(|f| f.contains(needle))
}

/// Build recommendations in a fixed order. Untriggered ones are left out.
pub fn generate_recommendations(
    issues: &[String],
    gaps: &[String],
    clause_type: &str,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if mentions(issues, "brief") {
        recommendations.push(EXPAND_CLAUSE.to_string());
    }

    if mentions(issues, "legal terminology") {
        recommendations.push(USE_MANDATORY_LANGUAGE.to_string());
    }

    if mentions(gaps, "notice period") {
        recommendations.push(SPECIFY_NOTICE_PERIOD.to_string());
    }

    if mentions(gaps, "liability") {
        recommendations.push(ADD_LIABILITY_CAP.to_string());
    }

    if !gaps.is_empty() {
        recommendations.push(format!(
            "Address missing {} requirements per industry standards",
            clause_type.to_lowercase()
        ));
    }

    recommendations
}
