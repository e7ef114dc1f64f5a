//! Prompt assembly for retrieval-augmented generation.

/// Build the generation prompt from retrieved context and the user query.
///
/// The layout is fixed: a context label, the retrieved texts joined with a
/// blank line (empty when nothing was retrieved), a question label holding
/// the query, and a trailing answer label. Identical inputs produce a
/// byte-identical prompt.
pub fn build_prompt(context: &[String], query: &str) -> String {
    format!(
        "Context:\n{}\n\nQuestion:\n{}\n\nAnswer:",
        context.join("\n\n"),
        query
    )
}
