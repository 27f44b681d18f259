use crate::patterns::required_elements;

/// Report required elements missing for the clause type.
///
/// An element counts as present when any one of its words appears in the
/// body, so a lone "period" anywhere satisfies "notice period".
pub fn check_required_elements(text: &str, clause_type: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();

    required_elements(clause_type)
        .iter()
        .filter(|element| {
            !element
                .split(' ')
                .any(|word| text_lower.contains(word))
        })
        .map(|element| format!("Missing: {}", element))
        .collect()
}
