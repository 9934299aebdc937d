//! Line-Oriented Front-End
//!
//! Renders the auth panel or the todo board after every step and maps
//! commands onto controller operations. The loop selects between stdin
//! and the session watcher, so an externally invalidated token flips the
//! screen back to sign-in without user input.

use std::io::Write;
use std::sync::Arc;

use auth::gateway::{AuthGateway, SessionStore};
use auth::{AuthFlow, AuthStep};
use kernel::id::TodoId;
use todo::TodoBoard;
use todo::repository::TodoRepository;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run<G, R>(
    mut flow: AuthFlow<G>,
    mut board: TodoBoard<R>,
    store: Arc<G>,
) -> anyhow::Result<()>
where
    G: AuthGateway + SessionStore,
    R: TodoRepository,
{
    let mut session_rx = store.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    sync(&mut flow, &mut board).await;
    render(&flow, &board);
    prompt()?;

    loop {
        tokio::select! {
            changed = session_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                sync(&mut flow, &mut board).await;
                render(&flow, &board);
                prompt()?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if handle(&mut flow, &mut board, line.trim()).await {
                    break;
                }
                sync(&mut flow, &mut board).await;
                render(&flow, &board);
                prompt()?;
            }
        }
    }

    Ok(())
}

/// Mirror the session into both controllers; a change reloads the board.
async fn sync<G, R>(flow: &mut AuthFlow<G>, board: &mut TodoBoard<R>)
where
    G: AuthGateway + SessionStore,
    R: TodoRepository,
{
    flow.sync_session();
    let user = flow.session().map(|s| s.user_id.clone());
    if board.set_session(user) {
        board.reload().await;
    }
}

/// Apply one command; returns whether the loop should end.
async fn handle<G, R>(flow: &mut AuthFlow<G>, board: &mut TodoBoard<R>, line: &str) -> bool
where
    G: AuthGateway + SessionStore,
    R: TodoRepository,
{
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "quit" | "exit" => return true,
        "help" => help(),

        // Auth panel
        "login" => {
            if let Some((email, password)) = rest.split_once(char::is_whitespace) {
                flow.switch_step(AuthStep::Login);
                flow.email = email.to_string();
                flow.password = password.trim().to_string();
                flow.sign_in().await;
            } else {
                println!("usage: login <email> <password>");
            }
        }
        "register" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(email), Some(password), Some(confirm)) => {
                    flow.switch_step(AuthStep::Register);
                    flow.email = email.to_string();
                    flow.password = password.to_string();
                    flow.password_confirm = confirm.to_string();
                    flow.sign_up().await;
                }
                _ => println!("usage: register <email> <password> <password-confirm>"),
            }
        }
        "mode" => match rest {
            "login" => flow.switch_step(AuthStep::Login),
            "register" => flow.switch_step(AuthStep::Register),
            _ => println!("usage: mode login|register"),
        },
        "code" => {
            flow.otp_code = rest.to_string();
            flow.verify_code().await;
        }
        "resend" => {
            flow.resend_code().await;
        }
        "cancel" => flow.cancel_mfa(),
        "logout" => flow.sign_out(),

        // Todo board
        "list" => board.reload().await,
        "add" => {
            board.draft_title = rest.to_string();
            board.create().await;
        }
        "edit" => {
            if let Some((index, title)) = rest.split_once(char::is_whitespace) {
                if let Some(id) = item_id(board, index) {
                    board.begin_edit(&id);
                    board.set_editing_title(title.trim());
                    board.save_edit().await;
                }
            } else {
                println!("usage: edit <番号> <新しいタイトル>");
            }
        }
        "del" => {
            if let Some(id) = item_id(board, rest) {
                board.delete(&id).await;
            }
        }

        other => println!("unknown command: {other} (help で一覧)"),
    }

    false
}

/// Resolve a 1-based list index from the rendered board.
fn item_id<R>(board: &TodoBoard<R>, input: &str) -> Option<TodoId>
where
    R: TodoRepository,
{
    let index: usize = match input.trim().parse() {
        Ok(index) => index,
        Err(_) => {
            println!("番号を指定してください。");
            return None;
        }
    };
    match board.items().get(index.checked_sub(1)?) {
        Some(item) => Some(item.id.clone()),
        None => {
            println!("その番号のTODOはありません。");
            None
        }
    }
}

fn render<G, R>(flow: &AuthFlow<G>, board: &TodoBoard<R>)
where
    G: AuthGateway + SessionStore,
    R: TodoRepository,
{
    println!();
    match flow.session() {
        Some(session) => {
            println!("== TODOボード ==");
            println!(
                "ログイン中: {}",
                session.email.as_deref().unwrap_or("ユーザー")
            );
            if let Some(error) = board.error() {
                println!("! {error}");
            }
            if board.is_loading() {
                println!("読み込み中…");
            } else if board.items().is_empty() {
                println!("まだTODOは登録されていません。");
            } else {
                for (index, item) in board.items().iter().enumerate() {
                    println!("{}. {}", index + 1, item.title);
                }
            }
        }
        None => {
            let title = match flow.step() {
                AuthStep::Login => "ログイン",
                AuthStep::Register => "新規アカウント作成",
                AuthStep::MfaPending => "多要素認証を完了",
            };
            println!("== {title} ==");
            if let Some(error) = flow.error() {
                println!("! {error}");
            }
            if let Some(info) = flow.info() {
                println!("- {info}");
            }
            if flow.step() == AuthStep::MfaPending {
                if let Some(challenge) = flow.challenge() {
                    println!("認証コードは {} に送信されています。", challenge.identity);
                }
                println!("code <認証コード> で認証を完了してください。");
            }
        }
    }
}

fn help() {
    println!("login <email> <password>          ログイン");
    println!("register <email> <pass> <pass>    アカウント作成");
    println!("mode login|register               画面切り替え");
    println!("code <otp> / resend / cancel      多要素認証");
    println!("list / add <title>                TODO一覧・追加");
    println!("edit <番号> <title> / del <番号>  TODO編集・削除");
    println!("logout / quit");
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}
