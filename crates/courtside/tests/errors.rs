use courtside::{
    Error, ErrorKind, Pages,
    core::{
        config::PaginationConfig,
        source::{EntitySource, SourceError, SourceQuery},
    },
    entity::Player,
    page::PageQuery,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

///
/// FlakySource
///

enum FlakySource {
    Down,
    Stalled,
}

impl EntitySource<Player> for FlakySource {
    async fn execute(
        &self,
        _query: SourceQuery<Player>,
        cancel: CancellationToken,
    ) -> Result<Vec<Player>, SourceError> {
        match self {
            Self::Down => Err(SourceError::backend(std::io::Error::other(
                "connection reset by 10.0.0.7:5432",
            ))),
            Self::Stalled => {
                cancel.cancelled().await;
                Err(SourceError::Cancelled)
            }
        }
    }
}

fn fast_timeout() -> PaginationConfig {
    PaginationConfig {
        fetch_timeout_ms: 20,
        ..PaginationConfig::default()
    }
}

#[tokio::test]
async fn backend_failure_surfaces_as_unavailable_without_detail() {
    let pages: Pages<Player, _> = Pages::new(FlakySource::Down, PaginationConfig::default());

    let err = pages
        .query(PageQuery::new())
        .await
        .expect_err("backend failure must fail the request");

    assert_eq!(err.kind, ErrorKind::Unavailable);
    assert!(!err.message.contains("10.0.0.7"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn stalled_source_times_out() {
    let pages: Pages<Player, _> = Pages::new(FlakySource::Stalled, fast_timeout());

    let err = pages
        .get_page("points", None, 10, "next")
        .await
        .expect_err("stalled source should time out");

    assert_eq!(err.kind, ErrorKind::Timeout);
}

#[tokio::test]
async fn caller_cancellation_surfaces_as_cancelled() {
    let pages: Pages<Player, _> = Pages::new(FlakySource::Stalled, PaginationConfig::default());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        trigger.cancel();
    });

    let err = pages
        .query_with_cancel(PageQuery::new(), cancel)
        .await
        .expect_err("cancelled request should fail");

    assert_eq!(err.kind, ErrorKind::Cancelled);
}

#[test]
fn error_round_trips_through_json() {
    let err = Error::new(ErrorKind::Timeout);

    let json = serde_json::to_string(&err).expect("error should serialize");
    assert_eq!(
        json,
        r#"{"kind":"timeout","message":"the request timed out"}"#
    );

    let back: Error = serde_json::from_str(&json).expect("error should deserialize");
    assert_eq!(back, err);
}
