use text_completion::ModelId;

const TEMPLATE: &str = include_str!("page.html");

pub const ABOUT: &str = "This app demonstrates how to use Amazon Bedrock \
    to generate streaming responses from AI models. \
    Enter your prompt and watch the response generate in real-time!";

/// The whole page. Static apart from the model list, so it is built per call.
pub fn render_page() -> String {
    let options: String = ModelId::ALL
        .iter()
        .map(|model| format!("      <option value=\"{0}\">{0}</option>\n", model.as_str()))
        .collect();
    TEMPLATE
        .replace("{{MODEL_OPTIONS}}", options.trim_end())
        .replace("{{ABOUT}}", ABOUT)
}
