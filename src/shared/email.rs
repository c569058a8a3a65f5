//! E-mail helpers

/// Canonical form of an e-mail address used for storage and lookup.
///
/// Lower-cases the address. For `gmail.com` the dots and any `+tag` suffix
/// of the local part are dropped, since Gmail delivers those to the same box.
pub fn normalize_email(email: &str) -> String {
    let lowered = email.trim().to_lowercase();
    let Some((local, domain)) = lowered.split_once('@') else {
        return lowered;
    };

    if domain == "gmail.com" {
        let base = local.split('+').next().unwrap_or(local).replace('.', "");
        return format!("{base}@gmail.com");
    }
    format!("{local}@{domain}")
}
