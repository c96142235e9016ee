use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct MessageCreateBody {
    pub content: String,
    pub parent_id: Option<i32>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct MessageUpdateBody {
    pub content: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ReadQuery {
    /// New read flag for the lesson
    pub read: bool,
}

/// Content with surrounding whitespace removed, `None` when nothing is left.
pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blank_content_is_rejected() {
        assert_eq!(normalize_content(""), None);
        assert_eq!(normalize_content(" \n\t"), None);
        assert_eq!(normalize_content("  hi  "), Some(String::from("hi")));
    }
}
