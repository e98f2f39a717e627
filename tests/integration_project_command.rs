//! projectコマンドの統合テスト
//!
//! 設定の読み込み、パスワードキャッシュ、SQLクライアントの呼び出しを
//! フェイク実装で確認する

mod common;

use common::mock_services::{
    FakeSqlClient, FakeVersionControl, FixedClock, MemoryCredentialStore, ScriptRun,
    ScriptedPrompter,
};
use common::test_helpers::ProjectTree;
use pretty_assertions::assert_eq;
use sqlcl_wrapper::application::services::{ConfigService, CredentialService};
use sqlcl_wrapper::application::use_cases::{
    ExportOutcome, ExportReorganizerConfig, ExportReorganizerUseCase, ProjectCommand,
    RunProjectCommandUseCase,
};
use sqlcl_wrapper::WrapperError;

const START: i64 = 1_700_000_000;

fn words(list: &[&str]) -> ProjectCommand {
    ProjectCommand::new(list.iter().map(|s| s.to_string()).collect())
}

fn credentials(store: MemoryCredentialStore, clock: &FixedClock) -> CredentialService {
    CredentialService::with_store(Box::new(store), Box::new(clock.clone()))
}

#[tokio::test]
async fn test_script_and_connect_string_reach_the_client() {
    let tree = ProjectTree::new();
    tree.write_config(false);

    let config_service = ConfigService::default();
    let client = FakeSqlClient::new();
    let prompter = ScriptedPrompter::new(["tiger"]);
    let clock = FixedClock::at(START);
    let mut creds = credentials(MemoryCredentialStore::new(), &clock);

    let config = RunProjectCommandUseCase::new(&config_service, &client, &prompter)
        .execute(tree.root(), &words(&["export", "-o", "DEMO"]), &mut creds)
        .await
        .unwrap();

    assert_eq!(config.schema, "FEND");
    assert_eq!(
        client.runs(),
        vec![ScriptRun {
            script: "project export -o DEMO".to_string(),
            connect_string: "FEND/tiger@localhost:1521/XEPDB1".to_string(),
        }]
    );
    assert_eq!(prompter.asked(), vec!["Please enter the SCHEMA password: "]);
}

#[tokio::test]
async fn test_password_is_reused_within_window() {
    let tree = ProjectTree::new();
    tree.write_config(false);

    let config_service = ConfigService::default();
    let client = FakeSqlClient::new();
    let prompter = ScriptedPrompter::new(["tiger"]);
    let clock = FixedClock::at(START);
    let mut creds = credentials(MemoryCredentialStore::new(), &clock);
    let use_case = RunProjectCommandUseCase::new(&config_service, &client, &prompter);

    use_case
        .execute(tree.root(), &words(&["list"]), &mut creds)
        .await
        .unwrap();
    clock.advance(899);
    use_case
        .execute(tree.root(), &words(&["list"]), &mut creds)
        .await
        .unwrap();

    assert_eq!(prompter.asked().len(), 1);
    let runs = client.runs();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[1].connect_string, "FEND/tiger@localhost:1521/XEPDB1");
}

#[tokio::test]
async fn test_password_is_requested_again_at_expiry() {
    let tree = ProjectTree::new();
    tree.write_config(false);

    let config_service = ConfigService::default();
    let client = FakeSqlClient::new();
    let prompter = ScriptedPrompter::new(["lion"]);
    let clock = FixedClock::at(START + 900);
    let mut creds = credentials(MemoryCredentialStore::with_cached("tiger", START), &clock);

    RunProjectCommandUseCase::new(&config_service, &client, &prompter)
        .execute(tree.root(), &words(&["list"]), &mut creds)
        .await
        .unwrap();

    assert_eq!(prompter.asked().len(), 1);
    assert_eq!(client.runs()[0].connect_string, "FEND/lion@localhost:1521/XEPDB1");
}

#[tokio::test]
async fn test_timestamp_is_refreshed_even_when_client_fails() {
    let tree = ProjectTree::new();
    tree.write_config(false);

    let config_service = ConfigService::default();
    let client = FakeSqlClient::new().exiting_with(3);
    let prompter = ScriptedPrompter::new(Vec::<String>::new());
    let clock = FixedClock::at(START + 600);
    let mut creds = credentials(MemoryCredentialStore::with_cached("tiger", START), &clock);

    let err = RunProjectCommandUseCase::new(&config_service, &client, &prompter)
        .execute(tree.root(), &words(&["list"]), &mut creds)
        .await
        .unwrap_err();

    assert!(matches!(err, WrapperError::CommandError { .. }));
    assert_eq!(err.exit_code(), 3);

    // 600s after the first save, but the failed run refreshed the slot
    clock.set(START + 600 + 899);
    let password = creds.get_or_prompt(&prompter).unwrap();
    assert_eq!(password, "tiger");
}

#[tokio::test]
async fn test_missing_config_never_runs_the_client() {
    let tree = ProjectTree::new();

    let config_service = ConfigService::default();
    let client = FakeSqlClient::new();
    let prompter = ScriptedPrompter::new(["tiger"]);
    let clock = FixedClock::at(START);
    let store = MemoryCredentialStore::new();
    let mut creds = credentials(store, &clock);

    let err = RunProjectCommandUseCase::new(&config_service, &client, &prompter)
        .execute(tree.root(), &words(&["export"]), &mut creds)
        .await
        .unwrap_err();

    assert!(matches!(err, WrapperError::ConfigMissing { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(client.runs().is_empty());
    assert!(prompter.asked().is_empty());
}

#[tokio::test]
async fn test_export_end_to_end() {
    let tree = ProjectTree::new();
    tree.write_config(true);

    let config_service = ConfigService::default();
    let client = FakeSqlClient::new().writing(
        tree.path("src/database/fenddev7/tables/accounts.sql"),
        "create table \"FENDDEV7\".\"ACCOUNTS\" (id number);\n",
    );
    let prompter = ScriptedPrompter::new(Vec::<String>::new());
    let clock = FixedClock::at(START + 10);
    let mut creds = credentials(MemoryCredentialStore::with_cached("tiger", START), &clock);

    let command = words(&["export", "-o", "ACCOUNTS"]);
    let config = RunProjectCommandUseCase::new(&config_service, &client, &prompter)
        .execute(tree.root(), &command, &mut creds)
        .await
        .unwrap();
    assert!(command.is_export());
    assert!(config.verbose);

    let vcs = FakeVersionControl::new(tree.root())
        .with_lines(["?? src/database/fenddev7/tables/accounts.sql"]);
    let outcome = ExportReorganizerUseCase::new(
        &vcs,
        ExportReorganizerConfig::default().with_verbose(config.verbose),
    )
    .execute(tree.root())
    .await
    .unwrap();

    assert!(matches!(outcome, ExportOutcome::Reorganized(_)));
    assert_eq!(
        tree.read("src/database/fend/tables/accounts.sql"),
        "create table \"FEND\".\"ACCOUNTS\" (id number);\n"
    );
    assert!(!tree.exists("src/database/fenddev7"));
}

#[test]
fn test_prompted_password_is_saved_with_time() {
    let clock = FixedClock::at(START);
    let store = MemoryCredentialStore::new();
    let mut creds = credentials(store.clone(), &clock);

    let prompter = ScriptedPrompter::new(["tiger"]);
    assert_eq!(creds.get_or_prompt(&prompter).unwrap(), "tiger");
    assert_eq!(store.stored_password().as_deref(), Some("tiger"));
    assert_eq!(store.stored_save_time(), Some(START));

    clock.advance(899);
    assert_eq!(creds.get_or_prompt(&prompter).unwrap(), "tiger");
    assert_eq!(store.stored_save_time(), Some(START + 899));
    assert_eq!(prompter.asked().len(), 1);
}
