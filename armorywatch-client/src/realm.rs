//! Realm name to API slug normalization.

/// Normalize a realm name to its API slug form.
///
/// Realm names as players type them ("Mal'Ganis", "Área 52") differ from
/// the slugs the API routes on: lowercase, apostrophes dropped, whitespace
/// replaced with dashes, diacritics folded to base Latin letters.
///
/// # Example
///
/// ```rust
/// use armorywatch_client::realm_slug;
///
/// assert_eq!(realm_slug("Twisting Nether"), "twisting-nether");
/// assert_eq!(realm_slug("Mal'Ganis"), "malganis");
/// assert_eq!(realm_slug("Área 52"), "area-52");
/// ```
pub fn realm_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\'' | '\u{2019}' => {}
            c if c.is_whitespace() => {
                // Collapse runs of whitespace into a single dash
                if !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            c => match fold_diacritic(c) {
                Some(folded) => slug.push_str(folded),
                None => slug.extend(c.to_lowercase()),
            },
        }
    }
    slug
}

/// Fold a Latin letter with a diacritic to its lowercase base form.
///
/// Covers the accented characters that actually occur in realm names
/// (EU French/German/Spanish realms, mostly). Returns `None` for anything
/// else, which passes through lowercased.
fn fold_diacritic(c: char) -> Option<&'static str> {
    let folded = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => "a",
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => "e",
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => "i",
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => "o",
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => "u",
        'ý' | 'ÿ' | 'Ý' => "y",
        'ñ' | 'Ñ' => "n",
        'ç' | 'Ç' => "c",
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        'ø' | 'Ø' => "o",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_lowercase() {
        assert_eq!(realm_slug("Durotan"), "durotan");
        assert_eq!(realm_slug("stormrage"), "stormrage");
    }

    #[test]
    fn spaces_become_dashes() {
        assert_eq!(realm_slug("Twisting Nether"), "twisting-nether");
        assert_eq!(realm_slug("Burning  Legion"), "burning-legion");
    }

    #[test]
    fn apostrophes_are_dropped() {
        assert_eq!(realm_slug("Mal'Ganis"), "malganis");
        assert_eq!(realm_slug("Kel'Thuzad"), "kelthuzad");
        // Typographic apostrophe too
        assert_eq!(realm_slug("Drak\u{2019}thul"), "drakthul");
    }

    #[test]
    fn diacritics_fold_to_base_letters() {
        assert_eq!(realm_slug("Área 52"), "area-52");
        assert_eq!(realm_slug("Ysondre"), "ysondre");
        assert_eq!(realm_slug("Aggra (Português)"), "aggra-(portugues)");
    }

    #[test]
    fn already_slugged_names_pass_through() {
        assert_eq!(realm_slug("twisting-nether"), "twisting-nether");
    }
}
