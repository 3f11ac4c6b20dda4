//! Utility functions

/// Institutional mail address for a matriculation id.
///
/// Staff and doctoral ids ("d...") live on the main domain, student ids
/// ("s...") on the students one.
pub fn polito_mail(matricola: &str) -> String {
    let matricola = matricola.trim().to_lowercase();
    let domain = if matricola.starts_with('d') {
        "polito.it"
    } else {
        "studenti.polito.it"
    };
    format!("{}@{}", matricola, domain)
}
