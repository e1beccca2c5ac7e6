use async_trait::async_trait;
use cfblog_common::{ContentVariant, Post};

use crate::error::FetchError;

/// Result of looking a slug up, as seen by a page handler.
#[derive(Debug)]
pub enum FetchOutcome {
    Found(Post),
    NotFound,
    Failed(FetchError),
}

impl From<Result<Option<Post>, FetchError>> for FetchOutcome {
    fn from(result: Result<Option<Post>, FetchError>) -> Self {
        match result {
            Ok(Some(post)) => Self::Found(post),
            Ok(None) => Self::NotFound,
            Err(e) => Self::Failed(e),
        }
    }
}

/// Something that can fetch a single post by slug
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Which delivery API this source talks to; decides how the body renders.
    fn variant(&self) -> ContentVariant;

    /// Fetch the post with `slug`. `Ok(None)` when no post matches.
    async fn fetch_post(&self, slug: &str) -> Result<Option<Post>, FetchError>;

    async fn fetch_outcome(&self, slug: &str) -> FetchOutcome {
        self.fetch_post(slug).await.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfblog_common::{ContentfulConfig, Document, Links};

    struct Fixed(Option<Post>);

    #[async_trait]
    impl PostSource for Fixed {
        fn variant(&self) -> ContentVariant {
            ContentVariant::Rest
        }

        async fn fetch_post(&self, _slug: &str) -> Result<Option<Post>, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn post() -> Post {
        Post {
            id: "p1".into(),
            title: "T".into(),
            slug: Some("t".into()),
            body: Document::document(Vec::new()),
            links: Links::default(),
        }
    }

    #[tokio::test]
    async fn test_fetch_outcome() {
        assert!(matches!(
            Fixed(Some(post())).fetch_outcome("t").await,
            FetchOutcome::Found(p) if p.id == "p1"
        ));
        assert!(matches!(
            Fixed(None).fetch_outcome("t").await,
            FetchOutcome::NotFound
        ));
    }

    #[test]
    fn test_error_becomes_failed() {
        let outcome: FetchOutcome = Err(FetchError::GraphQl {
            messages: vec!["boom".into()],
        })
        .into();
        assert!(matches!(outcome, FetchOutcome::Failed(FetchError::GraphQl { .. })));
    }

    #[test]
    fn test_source_for_variant() {
        let config = ContentfulConfig::new("s", "master", "t");
        let http = reqwest::Client::new();
        for variant in [ContentVariant::GraphQl, ContentVariant::Rest] {
            let source = crate::source_for(variant, &config, http.clone()).unwrap();
            assert_eq!(source.variant(), variant);
        }
    }
}
