use crate::keypoints::char_len;

/// Build the key-point prompt, embedding at most `char_limit` chars of the
/// transcript.
pub fn build_key_points_prompt(transcript: &str, char_limit: usize) -> String {
    let sample: String = transcript.chars().take(char_limit).collect();
    let truncated = char_len(transcript) > char_limit;

    format!(
        "You are an expert at distilling knowledge from video transcripts.\n\
Extract 6-8 key points from the transcript below.\n\
\n\
Rules:\n\
- Each key point is one sentence of 25-45 characters.\n\
- Each point must carry information that summarizes the video.\n\
- Mention the key people, events and figures.\n\
- Cover different subtopics instead of repeating one.\n\
- Write in the dominant language of the transcript.\n\
\n\
Transcript{note}:\n\
{sample}\n\
\n\
Answer with a numbered list only (6-8 items, no more):\n\
1. [key point 1]\n\
2. [key point 2]\n\
3. [key point 3]\n\
...",
        note = if truncated { " (truncated)" } else { "" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_caps_transcript_by_chars() {
        let transcript = "中".repeat(9000);
        let prompt = build_key_points_prompt(&transcript, 8000);
        assert_eq!(prompt.matches('中').count(), 8000);
        assert!(prompt.contains("Transcript (truncated):"));
    }

    #[test]
    fn short_transcript_is_embedded_whole() {
        let prompt = build_key_points_prompt("a short transcript", 8000);
        assert!(prompt.contains("Transcript:\na short transcript\n"));
        assert!(prompt.contains("6-8 key points"));
    }
}
