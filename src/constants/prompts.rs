pub const QUIZ_GENERATOR_SYSTEM_PROMPT: &str =
    "You are a quiz generator. Always respond in valid JSON array format as requested.";

pub const STUDY_ASSISTANT_SYSTEM_PROMPT: &str =
    "You are a helpful study assistant. Always respond in valid JSON format as requested.";

pub const OFF_TOPIC_REPLY: &str = "**ask only generous and study related questions**";

const QUIZ_GENERATOR_PROMPT: &str = r#"Generate a set of **exactly {min} to {max} multiple-choice questions** (MCQs) on the topic "{topic}".
Ensure each question follows this **strict JSON format**:

[
    {
        "question": "What is AI?",
        "options": {
            "A": "Artificial Intelligence",
            "B": "Automated Input",
            "C": "Advanced Interaction",
            "D": "Analytical Insight"
        },
        "correct": "A"
    },
    ...
]

Each element of the array must conform to this JSON Schema:

{schema}

**Rules:**
- Each question must have exactly 4 options labeled "A", "B", "C", and "D".
- Exactly one option is correct and "correct" holds its label.
- Provide only the JSON array. Do not include any explanations or extra text."#;

const STUDY_ASSISTANT_PROMPT: &str = r#"If the prompt is asking about educational material, give a proper response. If not, return this message:
{off_topic}

Always respond in the following strict **JSON format**:

{
  "ai_response": "The study material should be here.",
  "topic": "The related topic for the study material should be here."
}

**Rules:**
- ONLY send valid JSON. No markdown or text outside the JSON object.
- Use double quotes for all JSON keys and string values.
- If the topic is study-related, generate a helpful educational answer.
- NEVER include links.
- Do not send anything outside the JSON object.

This is the question: "{question}""#;

pub fn quiz_generation_prompt(topic: &str, min: usize, max: usize, schema: &str) -> String {
    QUIZ_GENERATOR_PROMPT
        .replace("{min}", &min.to_string())
        .replace("{max}", &max.to_string())
        .replace("{schema}", schema)
        .replace("{topic}", topic)
}

pub fn study_assistant_prompt(question: &str) -> String {
    STUDY_ASSISTANT_PROMPT
        .replace("{off_topic}", OFF_TOPIC_REPLY)
        .replace("{question}", question)
}
