//! Identifier conversions for generated C code.

/// Convert a qualified name to a C identifier.
///
/// Scope separators (`.` and `/`) become `_`. Case is preserved.
///
/// # Examples
/// ```
/// use protofreeze_core::utils::to_cident;
/// assert_eq!(to_cident("foo.bar.Baz"), "foo_bar_Baz");
/// assert_eq!(to_cident("out/person"), "out_person");
/// ```
pub fn to_cident(s: &str) -> String {
    s.chars()
        .map(|c| if matches!(c, '.' | '/') { '_' } else { c })
        .collect()
}

/// Convert a qualified name or path to a preprocessor identifier.
///
/// Like [`to_cident`], uppercased, and any other character that cannot appear
/// in a macro name also becomes `_`.
///
/// # Examples
/// ```
/// use protofreeze_core::utils::to_preproc;
/// assert_eq!(to_preproc("foo.bar.Baz"), "FOO_BAR_BAZ");
/// assert_eq!(to_preproc("my-file.pb"), "MY_FILE_PB");
/// ```
pub fn to_preproc(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Enclosing scope of a qualified name, including the trailing separator.
///
/// Returns the empty string for unscoped names.
///
/// # Examples
/// ```
/// use protofreeze_core::utils::scope_of;
/// assert_eq!(scope_of("pkg.Msg.Kind"), "pkg.Msg.");
/// assert_eq!(scope_of("Kind"), "");
/// ```
pub fn scope_of(s: &str) -> &str {
    match s.rfind('.') {
        Some(dot) => &s[..=dot],
        None => "",
    }
}
