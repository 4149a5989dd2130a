//! Turn a rendered prompt into a completion request.

use pricelens_llm::LlmRequest;
use pricelens_prompt::BuiltPrompt;

pub(crate) fn completion_request(built: BuiltPrompt, model: &str) -> LlmRequest {
    let mut request = LlmRequest::new(built.user, model)
        .with_temperature(built.parameters.temperature)
        .with_max_tokens(built.parameters.max_tokens);

    if let Some(system) = built.system {
        request = request.with_system(system);
    }

    request
}
