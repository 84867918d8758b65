//! Domain request builders. Each one turns a validated user intent into a
//! system/user prompt pair for the completion client. Builders are pure:
//! an empty required input is rejected here, before any network activity.

use thiserror::Error;

use crate::upstream::{CompletionRequest, ModelKind, UserContent};

const PHOTO_SYSTEM: &str =
    "You are an expert image analyst. Analyze images and provide detailed insights.";
const PHOTO_USER: &str = "Analyze this image and provide: 1) Description, 2) Emotions detected, \
     3) Objects/people visible, 4) Psychological insights. Respond in JSON format.";

const MBTI_SYSTEM_QUIZ: &str =
    "You are an MBTI expert. Analyze quiz responses and determine MBTI type with confidence level.";
const MBTI_SYSTEM_CONTENT: &str =
    "You are an MBTI expert. Analyze the provided content and determine MBTI type with confidence level.";
const MBTI_USER_IMAGE: &str =
    "Analyze this image for MBTI type based on visual cues, expressions, and context. Respond in JSON.";

const CHAT_SYSTEM: &str = "You are a psychological analyst specializing in chat conversations. \
     Analyze conversations for emotional patterns, communication style, and personality insights.";

const BRAINSTORM_SYSTEM: &str = "You are a creative brainstorming assistant. Generate diverse, \
     innovative ideas based on user input. Organize by categories and provide actionable next steps.";
const BRAINSTORM_SHORT: &str = "Generate quick, actionable brainstorming results with 5-7 focused \
     ideas, clear categories, and immediate next steps.";
const BRAINSTORM_LONG: &str = "Generate comprehensive, in-depth brainstorming results with 10+ \
     ideas, detailed categories, and extensive next steps.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Empty(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbtiMode {
    Text,
    Image,
    Quiz,
}

/// Verbosity target for the ideation system instruction. `None` at the call
/// sites means the base instruction with no sizing hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Short,
    Long,
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty(field))
    } else {
        Ok(())
    }
}

/// Vision prompt for photo analysis. `image_data_url` is the uploaded image
/// as a `data:<mime>;base64,...` string.
pub fn photo_request(image_data_url: &str) -> Result<CompletionRequest, ValidationError> {
    require("image", image_data_url)?;

    Ok(CompletionRequest {
        model: ModelKind::Vision,
        system: PHOTO_SYSTEM.to_string(),
        user: UserContent::TextWithImage {
            text: PHOTO_USER.to_string(),
            image_url: image_data_url.to_string(),
        },
    })
}

/// Personality-type prompt. Text and quiz modes embed the input into a text
/// prompt on the general model; image mode attaches the input as an image
/// on the vision model.
pub fn mbti_request(input: &str, mode: MbtiMode) -> Result<CompletionRequest, ValidationError> {
    require("input", input)?;

    let system = match mode {
        MbtiMode::Quiz => MBTI_SYSTEM_QUIZ,
        MbtiMode::Text | MbtiMode::Image => MBTI_SYSTEM_CONTENT,
    };

    let (model, user) = match mode {
        MbtiMode::Image => (
            ModelKind::Vision,
            UserContent::TextWithImage {
                text: MBTI_USER_IMAGE.to_string(),
                image_url: input.to_string(),
            },
        ),
        MbtiMode::Text | MbtiMode::Quiz => (
            ModelKind::General,
            UserContent::Text(format!(
                "Analyze this content for MBTI type: {input}. Respond in JSON with: \
                 mbti, confidence, traits (E_I, S_N, T_F, J_P), description, advice."
            )),
        ),
    };

    Ok(CompletionRequest {
        model,
        system: system.to_string(),
        user,
    })
}

/// Quiz answers become one numbered text block before prompting.
pub fn quiz_answers_to_text(answers: &[String]) -> String {
    answers
        .iter()
        .enumerate()
        .map(|(i, answer)| format!("Q{}: {}", i + 1, answer))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn chat_request(chat_history: &str) -> Result<CompletionRequest, ValidationError> {
    require("chat history", chat_history)?;

    Ok(CompletionRequest {
        model: ModelKind::General,
        system: CHAT_SYSTEM.to_string(),
        user: UserContent::Text(format!(
            "Analyze this conversation:\n{chat_history}\n\nProvide: overallTone, mood, \
             keyTopics, personalityInsights, suggestions. Respond in JSON."
        )),
    })
}

pub fn brainstorm_request(
    prompt: &str,
    context: Option<&str>,
    verbosity: Option<Verbosity>,
) -> Result<CompletionRequest, ValidationError> {
    require("prompt", prompt)?;

    let system = match verbosity {
        None => BRAINSTORM_SYSTEM.to_string(),
        Some(Verbosity::Short) => format!("{BRAINSTORM_SYSTEM} {BRAINSTORM_SHORT}"),
        Some(Verbosity::Long) => format!("{BRAINSTORM_SYSTEM} {BRAINSTORM_LONG}"),
    };

    let user = match context {
        Some(context) if !context.trim().is_empty() => {
            format!("Context: {context}\n\nBrainstorm ideas for: {prompt}")
        }
        _ => format!("Brainstorm ideas for: {prompt}"),
    };

    Ok(CompletionRequest {
        model: ModelKind::General,
        system,
        user: UserContent::Text(user),
    })
}
