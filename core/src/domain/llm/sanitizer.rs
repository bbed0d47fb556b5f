const FENCE: &str = "```";

/// Strip markdown code fences and surrounding whitespace from model output.
///
/// Repeats until nothing changes, so applying it twice gives the same
/// result as applying it once. Broken JSON is left for the decoder to reject.
pub fn sanitize(text: &str) -> String {
    let mut current = text.trim();
    loop {
        let stripped = strip_fence(current);
        if stripped == current {
            return current.to_string();
        }
        current = stripped;
    }
}

fn strip_fence(text: &str) -> &str {
    let mut out = text;
    if let Some(rest) = out.strip_prefix(FENCE) {
        // language tag, e.g. ```json
        out = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = out.strip_suffix(FENCE) {
        out = rest;
    }
    out.trim()
}
