mod common;

use std::fs;

use common::{TestContext, edit_body, search_body};
use mockito::Matcher;
use phorge_flow::{Action, AppError, PollEvent, TaskMutationForm, TaskSearchForm};
use serial_test::serial;

/// Clears the credential variables so only the config file is used.
struct CleanEnv {
    saved: Vec<(&'static str, Option<std::ffi::OsString>)>,
}

impl CleanEnv {
    fn new() -> Self {
        let saved = ["PHORGE_HOST", "PHORGE_API_TOKEN"]
            .into_iter()
            .map(|key| {
                let original = std::env::var_os(key);
                unsafe { std::env::remove_var(key) };
                (key, original)
            })
            .collect();
        Self { saved }
    }
}

impl Drop for CleanEnv {
    fn drop(&mut self) {
        for (key, original) in &self.saved {
            if let Some(value) = original {
                unsafe { std::env::set_var(key, value) };
            }
        }
    }
}

#[test]
#[serial]
fn execute_search_through_config_file() {
    let _env = CleanEnv::new();
    let mut ctx = TestContext::new();
    let config = ctx.write_config();
    let mock = ctx
        .server
        .mock("POST", "/api/maniphest.search")
        .match_body(Matcher::UrlEncoded("constraints[ids][0]".into(), "12".into()))
        .with_status(200)
        .with_body(search_body(&[(12, "TASK", "Twelve")]))
        .expect(1)
        .create();

    let form = TaskSearchForm { ids: Some("12".into()), ..Default::default() };
    let records = phorge_flow::execute(
        Some(&config),
        Action::SearchTasks { form, attachments: vec![], limit: None },
    )
    .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["fields"]["name"], "Twelve");
    mock.assert();
}

#[test]
#[serial]
fn execute_reports_validation_before_remote_call() {
    let _env = CleanEnv::new();
    let mut ctx = TestContext::new();
    let config = ctx.write_config();
    let mock = ctx.server.mock("POST", Matcher::Any).expect(0).create();

    let form = TaskSearchForm { priorities: Some("1,high".into()), ..Default::default() };
    let err = phorge_flow::execute(
        Some(&config),
        Action::SearchTasks { form, attachments: vec![], limit: None },
    )
    .unwrap_err();

    assert!(matches!(err, AppError::InvalidNumber { .. }));
    assert!(err.is_user_input());
    mock.assert();
}

#[test]
#[serial]
fn create_then_poll_with_file_state() {
    let _env = CleanEnv::new();
    let mut ctx = TestContext::new();
    let config = ctx.write_config();
    let _edit = ctx
        .server
        .mock("POST", "/api/maniphest.edit")
        .with_status(200)
        .with_body(edit_body(8))
        .expect(1)
        .create();
    let search = ctx
        .server
        .mock("POST", "/api/maniphest.search")
        .match_body(Matcher::UrlEncoded("constraints[createdStart]".into(), "1".into()))
        .with_status(200)
        .with_body(search_body(&[(8, "TASK", "Created")]))
        .expect(1)
        .create();

    let form = TaskMutationForm {
        title: Some("Created".into()),
        description: Some("From the library".into()),
        ..Default::default()
    };
    let created = phorge_flow::execute(Some(&config), Action::CreateTask(form)).unwrap();
    assert_eq!(created[0]["object"]["id"], 8);

    let state = ctx.work_dir().join("poll.toml");
    let polled = phorge_flow::poll(
        Some(&config),
        &state,
        PollEvent::TaskCreated,
        &Default::default(),
        1_800_000_000,
    )
    .unwrap();

    assert_eq!(polled.len(), 1);
    assert_eq!(fs::read_to_string(&state).unwrap().trim(), "last_poll = 1800000000");
    search.assert();
}

#[test]
#[serial]
fn poll_reads_every_page_before_advancing_watermark() {
    let _env = CleanEnv::new();
    let mut ctx = TestContext::new();
    let config = ctx.write_config();
    let mut first_page: serde_json::Value =
        serde_json::from_str(&search_body(&[(1, "TASK", "One"), (2, "TASK", "Two")])).unwrap();
    first_page["result"]["cursor"]["after"] = "2".into();
    let first = ctx
        .server
        .mock("POST", "/api/maniphest.search")
        .match_body(Matcher::Regex(r"^api\.token=[^&]*&constraints".into()))
        .with_status(200)
        .with_body(first_page.to_string())
        .expect(1)
        .create();
    let second = ctx
        .server
        .mock("POST", "/api/maniphest.search")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("after".into(), "2".into()),
            Matcher::UrlEncoded("constraints[createdStart]".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(search_body(&[(3, "TASK", "Three")]))
        .expect(1)
        .create();

    let state = ctx.work_dir().join("poll.toml");
    let polled =
        phorge_flow::poll(Some(&config), &state, PollEvent::TaskCreated, &Default::default(), 99)
            .unwrap();

    let ids: Vec<_> = polled.iter().map(|record| record["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(fs::read_to_string(&state).unwrap().trim(), "last_poll = 99");
    first.assert();
    second.assert();
}

#[test]
#[serial]
fn poll_keeps_watermark_when_a_later_page_fails() {
    let _env = CleanEnv::new();
    let mut ctx = TestContext::new();
    let config = ctx.write_config();
    let state = ctx.write("poll.toml", "last_poll = 40\n");
    let mut first_page: serde_json::Value =
        serde_json::from_str(&search_body(&[(1, "TASK", "One")])).unwrap();
    first_page["result"]["cursor"]["after"] = "1".into();
    let _first = ctx
        .server
        .mock("POST", "/api/maniphest.search")
        .match_body(Matcher::Regex(r"^api\.token=[^&]*&constraints".into()))
        .with_status(200)
        .with_body(first_page.to_string())
        .create();
    let _second = ctx
        .server
        .mock("POST", "/api/maniphest.search")
        .match_body(Matcher::UrlEncoded("after".into(), "1".into()))
        .with_status(502)
        .create();

    let err =
        phorge_flow::poll(Some(&config), &state, PollEvent::TaskCreated, &Default::default(), 99)
            .unwrap_err();

    assert!(err.to_string().starts_with("Error polling tasks"));
    assert_eq!(fs::read_to_string(&state).unwrap().trim(), "last_poll = 40");
}
