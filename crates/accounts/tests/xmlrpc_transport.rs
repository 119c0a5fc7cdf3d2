//! Exercises `XmlRpcClient` against a minimal local HTTP server.

use std::time::Duration;

use accounts_aggregator::{
    AccountListing, ClientConfig, Credential, PAGE_SIZE, PageRequest, PaginatedFetcher,
    XmlRpcClient,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one canned response per connection, returning the raw requests.
async fn serve(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut stream).await);

            let response = format!(
                "HTTP/1.1 {status} Status\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        }
        requests
    });

    (base_url, handle)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn users_response(start: usize, count: usize) -> String {
    let users: String = (start..start + count)
        .map(|i| {
            format!(
                "<value><struct>\
                 <member><name>email</name><value><string>user{i}@x.com</string></value></member>\
                 <member><name>roles</name><value><array><data><value><string>author</string></value></data></array></value></member>\
                 </struct></value>"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<methodResponse><params><param><value><array><data>{users}</data></array></value></param></params></methodResponse>"
    )
}

fn client() -> XmlRpcClient {
    XmlRpcClient::new(ClientConfig::default().with_timeout(Some(Duration::from_secs(10)))).unwrap()
}

#[tokio::test]
async fn fetches_all_pages_over_http() {
    let (base_url, server) = serve(vec![
        (200, users_response(0, PAGE_SIZE)),
        (200, users_response(PAGE_SIZE, 37)),
    ])
    .await;

    let client = client();
    let accounts = PaginatedFetcher::new(&client)
        .fetch_all(&format!("{base_url}/"), &Credential::new("admin", "s3cr&t"))
        .await
        .unwrap();

    assert_eq!(accounts.len(), 137);
    assert_eq!(accounts[136].email.as_deref(), Some("user136@x.com"));
    assert_eq!(accounts[0].roles, vec!["author".to_owned()]);

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 2);
    let first = &requests[0];
    assert!(first.starts_with("POST /xmlrpc.php HTTP/1.1"));
    assert!(first.to_ascii_lowercase().contains("content-type: text/xml"));
    assert!(first.to_ascii_lowercase().contains("user-agent: xml-rpc client"));
    assert!(first.contains("<methodName>wp.getUsers</methodName>"));
    assert!(first.contains("<string>admin</string>"));
    assert!(first.contains("<string>s3cr&amp;t</string>"));
    assert!(first.contains("<name>offset</name><value><int>0</int></value>"));
    assert!(requests[1].contains("<name>offset</name><value><int>100</int></value>"));
    assert!(requests[1].contains("<name>number</name><value><int>100</int></value>"));
}

#[tokio::test]
async fn fault_is_a_protocol_error() {
    let fault = "<?xml version=\"1.0\"?><methodResponse><fault><value><struct>\
        <member><name>faultCode</name><value><int>403</int></value></member>\
        <member><name>faultString</name><value><string>Incorrect username or password.</string></value></member>\
        </struct></value></fault></methodResponse>";
    let (base_url, _server) = serve(vec![(200, fault.to_owned())]).await;

    let err = client()
        .list_accounts(
            &base_url,
            &Credential::new("admin", "wrong"),
            PageRequest {
                offset: 0,
                number: PAGE_SIZE,
            },
        )
        .await
        .unwrap_err();

    assert!(err.is_protocol());
    assert!(err.to_string().contains("fault 403"));
    assert!(err.to_string().contains(&base_url));
}

#[tokio::test]
async fn undecodable_body_is_a_protocol_error() {
    let (base_url, _server) = serve(vec![(200, "<html>maintenance</html>".to_owned())]).await;

    let err = client()
        .list_accounts(
            &base_url,
            &Credential::default(),
            PageRequest {
                offset: 0,
                number: PAGE_SIZE,
            },
        )
        .await
        .unwrap_err();

    assert!(err.is_protocol());
}

#[tokio::test]
async fn http_error_status_is_a_transport_error() {
    let (base_url, _server) = serve(vec![(500, String::new())]).await;

    let err = client()
        .list_accounts(
            &base_url,
            &Credential::default(),
            PageRequest {
                offset: 0,
                number: PAGE_SIZE,
            },
        )
        .await
        .unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client()
        .list_accounts(
            &base_url,
            &Credential::default(),
            PageRequest {
                offset: 0,
                number: PAGE_SIZE,
            },
        )
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err.to_string().starts_with(&format!("Cannot connect to {base_url}")));
}
