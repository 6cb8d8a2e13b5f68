use super::{Conclusion, ConclusionError, ConclusionSource};
use crate::llm_client::prompts::{CONCLUSION_SYSTEM, TRANSCRIPT_HEADER};
use crate::llm_client::TextGenerator;

/// Sends the transcript to the generative service and returns its reply as the
/// conclusion. The reply is not validated; any remote failure is returned.
pub async fn conclude_via_llm(
    generator: &dyn TextGenerator,
    transcript: &str,
) -> Result<Conclusion, ConclusionError> {
    let content = format!("{TRANSCRIPT_HEADER}\n{transcript}");
    let text = generator.generate(CONCLUSION_SYSTEM, &content).await?;
    Ok(Conclusion {
        text,
        source: ConclusionSource::Llm,
        verdict: None,
    })
}
