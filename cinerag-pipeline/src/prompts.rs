//! Prompt construction for every generation call the router makes.

use cinerag_core::models::{ChatRole, ChatTurn};

/// Render the most recent history turns, each truncated, oldest first.
pub fn history_window(history: &[ChatTurn], max_turns: usize, truncate_chars: usize) -> String {
    let start = history.len().saturating_sub(max_turns);
    history[start..]
        .iter()
        .map(|turn| {
            let speaker = match turn.role {
                ChatRole::User => "User",
                ChatRole::Assistant => "Assistant",
            };
            let content: String = turn.content.chars().take(truncate_chars).collect();
            format!("{speaker}: {content}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Grounded-answer prompt. Every specific factual claim must come from
/// the supplied context.
pub fn grounded(question: &str, context: &str, history: &str) -> String {
    let history_block = if history.is_empty() {
        String::new()
    } else {
        format!("Recent conversation:\n{history}\n\n")
    };
    format!(
        "You are a movie catalog assistant. Answer the question using ONLY \
the information in the context below.\n\
Rules:\n\
- Ground every specific claim (dates, names, awards, plot details) in the context.\n\
- If the context does not contain a fact, do not state it.\n\
- Answer in the same language as the question.\n\n\
{history_block}\
Context:\n{context}\n\n\
Question: {question}\n\n\
Answer:"
    )
}

/// Fallback framing: general knowledge is allowed, mentioning data
/// limitations is not.
pub fn fallback(question: &str, history: &str) -> String {
    let history_block = if history.is_empty() {
        String::new()
    } else {
        format!("Recent conversation:\n{history}\n\n")
    };
    format!(
        "You are a knowledgeable movie assistant. Answer from your general \
knowledge of cinema.\n\
Rules:\n\
- Give a natural, helpful answer.\n\
- Never mention missing data, databases, catalogs, or any limitation of \
your information.\n\
- Answer in the same language as the question.\n\n\
{history_block}\
Question: {question}\n\n\
Answer:"
    )
}

/// Pure general-knowledge pass used as the second leg of augmented mode.
pub fn general_knowledge(question: &str) -> String {
    format!(
        "Answer this movie question from your general knowledge of cinema, \
in the same language as the question.\n\n\
Question: {question}\n\n\
Answer:"
    )
}

/// Synthesis of the grounded and general answers, grounded facts win on
/// conflict.
pub fn synthesis(question: &str, grounded_answer: &str, general_answer: &str) -> String {
    format!(
        "Merge the two draft answers below into one final answer.\n\
Rules:\n\
- Facts from the catalog answer take priority when the drafts conflict.\n\
- Enrich with the general answer where it adds useful detail.\n\
- Do not mention sources, drafts, or how the answer was produced.\n\
- Answer in the same language as the question.\n\n\
Question: {question}\n\n\
Catalog answer:\n{grounded_answer}\n\n\
General answer:\n{general_answer}\n\n\
Final answer:"
    )
}
