use super::*;
use std::{io::Cursor, sync::Mutex};

use async_trait::async_trait;
use client_core::GatewayError;
use serde_json::json;
use shared::{
    domain::{IndexRange, Item, Row, SampleIndex},
    protocol::{ItemsQuery, LabelPayload, ProgressResponse},
};

#[derive(Default)]
struct ScriptedApi {
    queries: Mutex<Vec<ItemsQuery>>,
    labels: Mutex<Vec<LabelPayload>>,
}

#[async_trait]
impl LabelingApi for ScriptedApi {
    async fn dataset_progress(&self) -> Result<ProgressResponse, GatewayError> {
        Ok(ProgressResponse {
            total: Some(json!(3)),
            ..ProgressResponse::default()
        })
    }

    async fn range_progress(&self, range: IndexRange) -> Result<ProgressResponse, GatewayError> {
        Ok(ProgressResponse {
            labeled_in_range: Some(json!(self.labels.lock().expect("labels").len())),
            range_total: Some(json!(range.end() - range.start() + 1)),
            ..ProgressResponse::default()
        })
    }

    async fn items(&self, query: ItemsQuery) -> Result<Vec<Item>, GatewayError> {
        self.queries.lock().expect("queries").push(query);
        Ok(vec![
            Item::new(5, Row::new().with("title", "A")),
            Item::new(9, Row::new().with("Title", "B")),
        ])
    }

    async fn submit_label(&self, payload: &LabelPayload) -> Result<(), GatewayError> {
        self.labels.lock().expect("labels").push(payload.clone());
        Ok(())
    }
}

type TestSession = Session<ScriptedApi, Cursor<Vec<u8>>, Vec<u8>>;

fn session(script: &str, settings: &Settings) -> TestSession {
    let view = TerminalView::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    Session::new(ReviewController::new(ScriptedApi::default(), view), settings)
}

fn printed(session: &TestSession) -> String {
    String::from_utf8(session.controller().view().output().clone()).expect("utf8")
}

#[tokio::test]
async fn labels_every_item_in_seeded_range() {
    let script = "load\nset critical high\nannotator sam\nsave\nsave\ny\nquit\n";
    let mut session = session(script, &Settings::default());

    session.run().await.expect("session");

    let api = session.controller().api();
    assert_eq!(
        api.queries.lock().expect("queries").as_slice(),
        [ItemsQuery {
            start: 0,
            end: 2,
            skip_labeled: false,
            show_labeled: false,
        }]
    );
    let labels = api.labels.lock().expect("labels");
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].sample_index, SampleIndex(5));
    assert_eq!(labels[0].critical_success_label, "high");
    assert_eq!(labels[0].annotator, "sam");
    assert_eq!(labels[1].sample_index, SampleIndex(9));
    assert!(labels[1].labels_blank(), "form resets after each render");
    assert_eq!(labels[1].annotator, "sam");

    let out = printed(&session);
    assert!(out.contains("Labeled 0 / 3 (dataset)"));
    assert!(out.contains("range: 0..2"));
    assert!(out.contains("#9  B"));
    assert!(out.contains("? No labels selected. Save empty labels? [y/N] "));
    assert!(out.contains("Labeled 2 / 3 (range)"));
    assert!(out.contains("#-  No items in range or all skipped"));
    assert!(session.controller().state().store.is_empty());
}

#[tokio::test]
async fn reversed_range_is_rejected_before_fetch() {
    let mut session = session("load 5 1\n", &Settings::default());

    session.run().await.expect("session");

    assert!(session.controller().api().queries.lock().expect("queries").is_empty());
    assert!(printed(&session).contains("! End must be >= start"));
}

#[tokio::test]
async fn settings_and_switches_feed_range_requests() {
    let settings = Settings {
        skip_labeled: true,
        ..Settings::default()
    };
    let mut session = session("load 1 1\nskip off\nshow on\nload 2 4\n", &settings);

    session.run().await.expect("session");

    let queries = session.controller().api().queries.lock().expect("queries").clone();
    assert_eq!(queries.len(), 2);
    assert!(queries[0].skip_labeled && !queries[0].show_labeled);
    assert_eq!((queries[1].start, queries[1].end), (2, 4));
    assert!(!queries[1].skip_labeled && queries[1].show_labeled);
}

#[tokio::test]
async fn declined_empty_save_and_bad_commands_keep_state() {
    let mut session = session("load\nsave\nn\nbogus\nprev\n", &Settings::default());

    session.run().await.expect("session");

    assert!(session.controller().api().labels.lock().expect("labels").is_empty());
    assert_eq!(session.controller().state().store.len(), 2);
    assert!(printed(&session).contains("! unknown command 'bogus'"));
}

#[tokio::test]
async fn missing_end_bound_reuses_typed_range() {
    let mut session = session("load 1\n", &Settings::default());

    session.run().await.expect("session");

    let queries = session.controller().api().queries.lock().expect("queries").clone();
    assert_eq!(
        queries.iter().map(|q| (q.start, q.end)).collect::<Vec<_>>(),
        vec![(1, 2)]
    );
    assert_eq!(session.controller().view().range_inputs(), (1, 2));
}
