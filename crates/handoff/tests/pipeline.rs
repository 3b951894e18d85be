//! End-to-end pipeline tests with fake collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use baton_domain::config::{Config, ProviderKind};
use baton_domain::error::{Error, Result};
use baton_domain::message::{ContentBlock, MessageContent, TranscriptMessage};
use baton_handoff::{
    read_handoff_summary, summary_body, HandoffPipeline, HandoffRequest, EMPTY_SESSION_SUMMARY,
};
use baton_providers::{
    CallOptions, CompletionApi, CredentialResolver, ModelCatalog, ResolvedModel,
};
use tempfile::TempDir;

// ── Fakes ──────────────────────────────────────────────────────────

struct StaticCatalog;

impl ModelCatalog for StaticCatalog {
    fn resolve(&self, provider: &str, model: &str) -> Option<ResolvedModel> {
        Some(ResolvedModel {
            provider: ProviderKind::Anthropic,
            provider_id: provider.to_string(),
            model_id: model.to_string(),
            base_url: "https://example.com".into(),
        })
    }
}

struct StaticCredentials(Option<&'static str>);

impl CredentialResolver for StaticCredentials {
    fn api_key(&self, _model: &ResolvedModel) -> Option<String> {
        self.0.map(str::to_string)
    }
}

/// Returns a fixed summary, counting calls and capturing the prompt.
struct FakeApi {
    calls: AtomicUsize,
    last_prompt: Mutex<Vec<TranscriptMessage>>,
    response: &'static str,
}

impl FakeApi {
    fn returning(response: &'static str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(Vec::new()),
            response,
        }
    }
}

#[async_trait::async_trait]
impl CompletionApi for FakeApi {
    async fn complete(
        &self,
        _model: &ResolvedModel,
        messages: &[TranscriptMessage],
        _opts: &CallOptions,
    ) -> Result<Vec<ContentBlock>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = messages.to_vec();
        Ok(vec![ContentBlock::Text {
            text: self.response.into(),
        }])
    }
}

/// Never resolves — exercises the wall-clock timeout.
struct NeverApi;

#[async_trait::async_trait]
impl CompletionApi for NeverApi {
    async fn complete(
        &self,
        _model: &ResolvedModel,
        _messages: &[TranscriptMessage],
        _opts: &CallOptions,
    ) -> Result<Vec<ContentBlock>> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

// ── Fixture helpers ────────────────────────────────────────────────

fn cfg_at(dir: &TempDir) -> Arc<Config> {
    let mut cfg = Config::default();
    cfg.agent.state_path = dir.path().to_path_buf();
    cfg.agent.agent_id = "a1".into();
    Arc::new(cfg)
}

fn pipeline_with(cfg: Arc<Config>, api: Arc<dyn CompletionApi>) -> HandoffPipeline {
    HandoffPipeline::with_parts(
        cfg,
        Arc::new(StaticCatalog),
        Arc::new(StaticCredentials(Some("sk-test"))),
        api,
    )
}

fn write_transcript(store: &std::path::Path, session_id: &str, lines: &[&str]) {
    std::fs::create_dir_all(store).unwrap();
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    std::fs::write(store.join(format!("{session_id}.jsonl")), content).unwrap();
}

fn request<'a>(session_id: &'a str, store: &'a std::path::Path) -> HandoffRequest<'a> {
    HandoffRequest {
        session_key: "agent:a1:main",
        session_id,
        store_path: store,
        session_file: None,
        agent_id: None,
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_session_never_calls_completion() {
    let dir = TempDir::new().unwrap();
    let cfg = cfg_at(&dir);
    let api = Arc::new(FakeApi::returning("unused"));
    let pipeline = pipeline_with(cfg.clone(), api.clone());

    let store = dir.path().join("store");
    std::fs::create_dir_all(&store).unwrap();
    let result = pipeline
        .perform_session_handoff(&request("s-empty", &store))
        .await
        .unwrap();

    assert_eq!(result.message_count, 0);
    assert_eq!(result.summary, EMPTY_SESSION_SUMMARY);
    assert!(result.summary_path.is_none());
    assert!(result.archived_transcript_path.is_none());
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    assert!(!cfg.handoff_dir(None).exists(), "no files written");
}

#[tokio::test]
async fn successful_handoff_round_trips() {
    let dir = TempDir::new().unwrap();
    let cfg = cfg_at(&dir);
    let api = Arc::new(FakeApi::returning("1. Goal — ship the thing."));
    let pipeline = pipeline_with(cfg.clone(), api.clone());

    let store = dir.path().join("store");
    write_transcript(
        &store,
        "s-1",
        &[
            r#"{"role":"user","content":"please ship the thing"}"#,
            r#"{"role":"assistant","content":"shipping"}"#,
        ],
    );

    // An older summary so ordering is observable.
    let handoff_dir = cfg.handoff_dir(None);
    std::fs::create_dir_all(&handoff_dir).unwrap();
    std::fs::write(handoff_dir.join("s-0.md"), "# Session Handoff\n\n---\n\nold\n").unwrap();
    std::thread::sleep(Duration::from_millis(20));

    let result = pipeline
        .perform_session_handoff(&request("s-1", &store))
        .await
        .unwrap();

    assert_eq!(result.message_count, 2);
    assert_eq!(result.summary, "1. Goal — ship the thing.");
    let summary_path = result.summary_path.as_ref().unwrap();
    assert!(summary_path.ends_with("s-1.md"));

    // The prompt carried the extracted transcript.
    let prompt = api.last_prompt.lock();
    let MessageContent::Text(ref user) = prompt[1].content else {
        panic!("expected text prompt");
    };
    assert!(user.contains("[user]: please ship the thing"));

    // Archive is a byte-for-byte copy; the original stays.
    let archived = result.archived_transcript_path.as_ref().unwrap();
    let original = store.join("s-1.jsonl");
    assert!(original.exists());
    assert_eq!(
        std::fs::read(archived).unwrap(),
        std::fs::read(&original).unwrap()
    );

    // Read-back matches what was written, and listing puts s-1 first.
    let content = read_handoff_summary(&cfg, "s-1", None).unwrap();
    assert_eq!(summary_body(&content), "1. Goal — ship the thing.\n");
    let infos = baton_handoff::list_handoff_summaries(&cfg, None);
    assert_eq!(infos[0].session_id, "s-1");
    assert!(infos.iter().any(|i| i.session_id == "s-0"));
}

#[tokio::test]
async fn archive_failure_is_non_fatal() {
    let dir = TempDir::new().unwrap();
    let cfg = cfg_at(&dir);
    let pipeline = pipeline_with(cfg.clone(), Arc::new(FakeApi::returning("summary")));

    // Messages in hand, but no transcript file anywhere on disk.
    let store = dir.path().join("store");
    std::fs::create_dir_all(&store).unwrap();
    let messages = vec![
        TranscriptMessage::user("hello"),
        TranscriptMessage::assistant("hi"),
    ];
    let result = pipeline
        .handoff_messages(&request("s-2", &store), &messages)
        .await
        .unwrap();

    assert!(result.archived_transcript_path.is_none());
    assert!(result.summary_path.is_some());
    assert!(read_handoff_summary(&cfg, "s-2", None).is_some());
}

#[tokio::test]
async fn no_usable_model_lists_candidates_and_skips_api() {
    let dir = TempDir::new().unwrap();
    let cfg = cfg_at(&dir);
    let api = Arc::new(FakeApi::returning("unused"));
    let pipeline = HandoffPipeline::with_parts(
        cfg.clone(),
        Arc::new(StaticCatalog),
        Arc::new(StaticCredentials(None)),
        api.clone(),
    );

    let store = dir.path().join("store");
    write_transcript(&store, "s-3", &[r#"{"role":"user","content":"hi"}"#]);

    let err = pipeline
        .perform_session_handoff(&request("s-3", &store))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoUsableModel(_)));
    assert!(err.to_string().contains("anthropic/claude-sonnet-4-5"));
    assert!(err.to_string().contains("openai/gpt-4o-mini"));
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    assert!(read_handoff_summary(&cfg, "s-3", None).is_none());
}

#[tokio::test]
async fn stuck_completion_times_out_within_bound() {
    let dir = TempDir::new().unwrap();
    let cfg = cfg_at(&dir);
    let pipeline =
        pipeline_with(cfg, Arc::new(NeverApi)).with_timeout(Duration::from_millis(200));

    let store = dir.path().join("store");
    write_transcript(&store, "s-4", &[r#"{"role":"user","content":"hi"}"#]);

    let started = Instant::now();
    let err = pipeline
        .perform_session_handoff(&request("s-4", &store))
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, Error::Timeout(_)));
    assert!(
        elapsed < Duration::from_secs(5),
        "timed out in {elapsed:?}, expected a bounded margin of 200ms"
    );
}
