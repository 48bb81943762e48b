const SEPARATORS: [char; 2] = ['_', '-'];

/// Names with more separators than this are only tried as spelled (65,536 variants max).
pub const MAX_SEPARATOR_GAPS: usize = 16;

/// Generate every separator spelling of `base_name`.
///
/// The name is lower-cased and split on `-` and `_`. Variant `i` joins segment `j` to
/// segment `j + 1` with `_` when bit `j` of `i` is clear and with `-` when it is set, so the
/// all-underscore spelling always comes first. Callers probe the variants in this order and
/// record the first hit as the canonical spelling.
///
/// Past [`MAX_SEPARATOR_GAPS`] separators the lower-cased name is returned on its own.
pub fn generate_variants(base_name: &str) -> Vec<String> {
    let lowered = base_name.to_lowercase();
    let segments: Vec<&str> = lowered.split(SEPARATORS).collect();
    if segments.len() <= 1 {
        return vec![lowered];
    }

    let gaps = segments.len() - 1;
    if gaps > MAX_SEPARATOR_GAPS {
        return vec![lowered];
    }
    (0..1usize << gaps)
        .map(|index| {
            let mut variant = String::with_capacity(lowered.len());
            variant.push_str(segments[0]);
            for (gap, segment) in segments[1..].iter().enumerate() {
                variant.push(SEPARATORS[(index >> gap) & 1]);
                variant.push_str(segment);
            }
            variant
        })
        .collect()
}

/// Drop a product-line prefix such as `ussr-` from an image name.
///
/// Everything up to and including the first `-` is removed, unless the name starts with the
/// dash, in which case it is returned unchanged.
pub fn strip_product_prefix(image_name: &str) -> &str {
    match image_name.find('-') {
        Some(index) if index > 0 => &image_name[index + 1..],
        _ => image_name,
    }
}
