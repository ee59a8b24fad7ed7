/// Longest hostname the engine looks at. Longer inputs are truncated
/// before segmentation rather than rejected.
pub const HOSTLEN: usize = 63;

/// Split a hostname into its dot-delimited labels, in host order
/// (most specific first): `"a.b.com"` becomes `["a", "b", "com"]`.
///
/// Empty input yields no labels. Leading, trailing and doubled dots yield
/// empty labels which are kept verbatim; insertion and search both segment
/// through this function, so the policy cannot diverge between the two.
pub fn split_labels(hostname: &str) -> Vec<&str> {
    let hostname = truncate(hostname);
    if hostname.is_empty() {
        return Vec::new();
    }
    hostname.split('.').collect()
}

fn truncate(hostname: &str) -> &str {
    if hostname.len() <= HOSTLEN {
        return hostname;
    }
    // Cut on a char boundary; patterns are ASCII in practice but a
    // misconfigured one must not panic the helper.
    let mut end = HOSTLEN;
    while !hostname.is_char_boundary(end) {
        end -= 1;
    }
    &hostname[..end]
}
