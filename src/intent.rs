use crate::models::{Content, ContentPart, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
  Chat,
  ImageGeneration,
}

const GENERATION_VERBS: [&str; 4] = ["generate", "create", "make", "draw"];

/// Text of the last message: the plain string content, or the first text part
/// when the content is a part list. Empty string if neither exists.
pub fn last_text(messages: &[Message]) -> &str {
  let Some(last) = messages.last() else {
    return "";
  };
  match &last.content {
    Content::Text(text) => text,
    Content::Parts(parts) => parts
      .iter()
      .find_map(|part| match part {
        ContentPart::Text { text } => Some(text.as_str()),
        ContentPart::ImageUrl { .. } => None,
      })
      .unwrap_or(""),
  }
}

/// Routes to image generation when the text names both a generation verb and
/// "image", case-insensitively. Anything else falls through to plain chat.
pub fn classify(text: &str) -> Intent {
  let lower = text.to_lowercase();
  let wants_image = lower.contains("image");
  let has_verb = GENERATION_VERBS.iter().any(|verb| lower.contains(verb));
  if wants_image && has_verb {
    Intent::ImageGeneration
  } else {
    Intent::Chat
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::ImageUrlData;

  fn message(content: Content) -> Message {
    Message {
      role: "user".to_string(),
      content,
    }
  }

  #[test]
  fn classify_detects_generation_requests() {
    assert_eq!(
      classify("please generate an image of a cat"),
      Intent::ImageGeneration
    );
    assert_eq!(classify("Create an IMAGE file"), Intent::ImageGeneration);
    assert_eq!(classify("draw an image of a boat"), Intent::ImageGeneration);
    assert_eq!(
      classify("can you make an image for my blog?"),
      Intent::ImageGeneration
    );
  }

  #[test]
  fn classify_requires_both_terms() {
    assert_eq!(classify("let's make plans"), Intent::Chat);
    assert_eq!(classify("draw me a map"), Intent::Chat);
    assert_eq!(classify("what is in this image?"), Intent::Chat);
    assert_eq!(classify(""), Intent::Chat);
  }

  #[test]
  fn last_text_reads_plain_string_content() {
    let messages = vec![
      message(Content::Text("first".to_string())),
      message(Content::Text("generate an image".to_string())),
    ];
    assert_eq!(last_text(&messages), "generate an image");
  }

  #[test]
  fn last_text_takes_first_text_part() {
    let messages = vec![message(Content::Parts(vec![
      ContentPart::ImageUrl {
        image_url: ImageUrlData {
          url: "data:image/jpeg;base64,abc".to_string(),
        },
      },
      ContentPart::Text {
        text: "describe this".to_string(),
      },
      ContentPart::Text {
        text: "ignored second part".to_string(),
      },
    ]))];
    assert_eq!(last_text(&messages), "describe this");
  }

  #[test]
  fn last_text_falls_back_to_empty() {
    assert_eq!(last_text(&[]), "");
    let no_text = vec![message(Content::Parts(vec![ContentPart::ImageUrl {
      image_url: ImageUrlData {
        url: "data:image/jpeg;base64,abc".to_string(),
      },
    }]))];
    assert_eq!(last_text(&no_text), "");
  }
}
