use std::time::{SystemTime, UNIX_EPOCH};

use admin_client::{AdminClient, AdminClientError};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running admin-server and database"]
async fn http_smoke_flow() {
    let base_url =
        std::env::var("ADMIN_SERVER_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let mut client = AdminClient::new(base_url).expect("client must build");

    let username = format!("admin_{}", unique_suffix());
    let password = "password123";

    let user = client
        .register(&username, password)
        .await
        .expect("register must succeed");
    assert_eq!(user.username, username);

    let duplicate = client.register(&username, password).await;
    assert!(matches!(duplicate, Err(AdminClientError::Conflict(_))));

    let wrong = client.login(&username, "wrong-password").await;
    assert!(matches!(wrong, Err(AdminClientError::Unauthorized(_))));
    assert!(client.get_token().is_none());

    client
        .login(&username, password)
        .await
        .expect("login must succeed");
    assert!(client.get_token().is_some());

    let title = format!("smoke {}", unique_suffix());
    client
        .create_post(&title, "smoke body")
        .await
        .expect("create_post must succeed");

    let created = client
        .dashboard()
        .await
        .expect("dashboard must succeed")
        .into_iter()
        .find(|post| post.title == title)
        .expect("created post must be listed");

    let fetched = client
        .get_post(created.id)
        .await
        .expect("get_post must succeed");
    assert_eq!(fetched.body, "smoke body");

    client
        .update_post(created.id, &title, "smoke body updated")
        .await
        .expect("update_post must succeed");
    let updated = client
        .get_post(created.id)
        .await
        .expect("get_post must succeed");
    assert_eq!(updated.body, "smoke body updated");
    assert!(updated.updated_at >= fetched.updated_at);

    client
        .delete_post(created.id)
        .await
        .expect("delete_post must succeed");

    let after_delete = client.get_post(created.id).await;
    assert!(matches!(after_delete, Err(AdminClientError::NotFound(_))));

    client.logout().await.expect("logout must succeed");
    assert!(client.get_token().is_none());
    assert!(matches!(
        client.dashboard().await,
        Err(AdminClientError::Unauthorized(_))
    ));
}
