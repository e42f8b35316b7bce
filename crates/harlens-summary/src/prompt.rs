use harlens_rules::AnalyzedRequest;

pub const SYSTEM_PROMPT: &str = "You are a helpful AI network performance analyst.";

const INSTRUCTIONS: &str = "You are a performance analyst. Summarize the following request-level \
issues from a HAR file into a short, readable explanation that highlights common patterns, \
potential root causes, and what to look at. Use concise technical language:";

/// Requests that raised at least one finding
pub fn flagged(requests: &[AnalyzedRequest]) -> Vec<&AnalyzedRequest> {
    requests.iter().filter(|r| r.has_findings()).collect()
}

/// Build the user prompt from every flagged request.
///
/// Each request becomes a block of `Request: <url>` followed by one
/// finding message per line; blocks are separated by a blank line.
pub fn build_prompt(requests: &[AnalyzedRequest]) -> String {
    let blocks: Vec<String> = flagged(requests)
        .into_iter()
        .map(|r| {
            let mut block = format!("Request: {}", r.record.url);
            for finding in &r.findings {
                block.push('\n');
                block.push_str(&finding.message);
            }
            block
        })
        .collect();

    format!("{}\n\n{}", INSTRUCTIONS, blocks.join("\n\n"))
}
