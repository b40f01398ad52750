use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::process;

use admin_client::{AdminClient, AdminClientError, Post, User};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

const TOKEN_FILE: &str = ".admin_token";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "ADMIN_SERVER_URL";

#[derive(Debug, Parser)]
#[command(name = "admin-cli", version, about = "CLI клиент для админки блога")]
struct Cli {
    /// Адрес сервера (по умолчанию ADMIN_SERVER_URL или http://127.0.0.1:8080).
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация администратора.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Вход, токен сохраняется в .admin_token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Выход, локальный токен удаляется.
    Logout,
    /// Список всех постов (требует токен).
    List,
    /// Создание поста (требует токен).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Получение поста по id (требует токен).
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Обновление поста (требует токен).
    ///
    /// Если `--body` не указан, используется текущий текст поста.
    Update {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: Option<String>,
    },
    /// Удаление поста (требует токен).
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, env::var(SERVER_ENV).ok());
    let mut client = AdminClient::new(server).context("не удалось создать HTTP клиент")?;

    if let Some(token) = load_token().context("не удалось прочитать .admin_token")? {
        client.set_token(token);
    }

    match cli.command {
        Command::Register { username, password } => {
            let user = client
                .register(&username, &password)
                .await
                .map_err(map_client_error)?;
            print_user("Регистрация успешна", &user);
        }
        Command::Login { username, password } => {
            client
                .login(&username, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            println!("Вход выполнен, токен сохранён в {TOKEN_FILE}");
        }
        Command::Logout => {
            client.logout().await.map_err(map_client_error)?;
            remove_token().context("не удалось удалить .admin_token")?;
            println!("Выход выполнен");
        }
        Command::List => {
            let posts = client.dashboard().await.map_err(map_client_error)?;
            print_list(&posts);
        }
        Command::Create { title, body } => {
            client
                .create_post(&title, &body)
                .await
                .map_err(map_client_error)?;
            println!("Пост создан");
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
        Command::Update { id, title, body } => {
            // без --body оставляем текущий текст поста
            let body = match body {
                Some(body) => body,
                None => client.get_post(id).await.map_err(map_client_error)?.body,
            };

            client
                .update_post(id, &title, &body)
                .await
                .map_err(map_client_error)?;
            println!("Пост обновлён: id={id}");
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, from_env: Option<String>) -> String {
    let raw = flag
        .or(from_env)
        .filter(|server| !server.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw.trim().to_string())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &AdminClient) -> io::Result<()> {
    if let Some(token) = client.get_token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn remove_token() -> io::Result<()> {
    match fs::remove_file(TOKEN_FILE) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn map_client_error(err: AdminClientError) -> anyhow::Error {
    let message = match err {
        AdminClientError::Unauthorized(_) => {
            "требуется авторизация: выполните `admin-cli login ...`".to_string()
        }
        AdminClientError::NotFound(message) => format!("ресурс не найден: {message}"),
        AdminClientError::Conflict(message) => format!("конфликт: {message}"),
        AdminClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        AdminClientError::UnexpectedResponse(message) => {
            format!("неожиданный ответ сервера: {message}")
        }
        AdminClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_user(title: &str, user: &User) {
    println!("{title}");
    println!("  id: {}", user.id);
    println!("  username: {}", user.username);
    println!("  created_at: {}", user.created_at);
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("body: {}", post.body);
    println!("created_at: {}", post.created_at);
    println!("updated_at: {}", post.updated_at);
}

fn print_list(posts: &[Post]) {
    println!("Постов: {}", posts.len());

    for post in posts {
        println!("- [{}] {} (updated_at={})", post.id, post.title, post.updated_at);
    }
}
