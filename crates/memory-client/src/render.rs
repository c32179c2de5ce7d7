use crate::MemorySnippet;

/// Character budget for memory context folded into the model instruction.
pub const DEFAULT_CONTEXT_BUDGET: usize = 500;

const ELLIPSIS: &str = "...";

/// Render snippets as `- ` bullets joined by newlines, within `budget` characters.
///
/// The first snippet that would overflow is cut short with `...` and nothing after
/// it is included.
pub fn render_memory_context(snippets: &[MemorySnippet], budget: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;

    for snippet in snippets {
        let content = snippet.content.trim();
        if content.is_empty() {
            continue;
        }
        let line = format!("- {content}");
        let sep = usize::from(!out.is_empty());
        let line_len = line.chars().count();

        if used + sep + line_len <= budget {
            if sep == 1 {
                out.push('\n');
            }
            out.push_str(&line);
            used += sep + line_len;
            continue;
        }

        let remaining = budget.saturating_sub(used + sep);
        // Only worth including if something beyond the bullet and ellipsis fits.
        if remaining > "- ".len() + ELLIPSIS.len() {
            if sep == 1 {
                out.push('\n');
            }
            out.extend(line.chars().take(remaining - ELLIPSIS.len()));
            out.push_str(ELLIPSIS);
        }
        break;
    }

    out
}
