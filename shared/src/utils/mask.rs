//! Masking helpers for log output

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the full domain.
///
/// # Example
///
/// ```
/// use vg_shared::utils::mask_email;
///
/// assert_eq!(mask_email("jane.doe@example.com"), "j*******@example.com");
/// ```
pub fn mask_email(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let mut chars = local.chars();
            let first = chars.next().unwrap_or('*');
            format!("{}{}@{}", first, "*".repeat(chars.count()), domain)
        }
        _ => "*".repeat(address.chars().count().max(1)),
    }
}
