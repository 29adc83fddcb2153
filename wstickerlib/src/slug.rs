//! Turn human readable names into identifiers, which are safe to use at urls and file names.

/// Returned by [`slugify`] if nothing usable is left of the name.
pub const FALLBACK_SLUG: &str = "pack";

/// Lowercase `name` and replace every run of non ascii alphanumeric chars with a single `_`.
/// Leading and trailing separators are dropped.
///
/// ```
/// use wstickerlib::slug::slugify;
/// assert_eq!(slugify("Astral Cats!"), "astral_cats");
/// assert_eq!(slugify("!!!"), "pack");
/// ```
pub fn slugify(name: &str) -> String {
	let mut slug = String::with_capacity(name.len());
	let mut separator = false;
	for c in name.chars() {
		if c.is_ascii_alphanumeric() {
			if separator && !slug.is_empty() {
				slug.push('_');
			}
			separator = false;
			slug.push(c.to_ascii_lowercase());
		} else {
			separator = true;
		}
	}
	if slug.is_empty() {
		return FALLBACK_SLUG.to_owned();
	}
	slug
}
