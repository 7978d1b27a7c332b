use super::{standard, HeaderMap};

#[test]
fn test_header_map_lookup() {
    let mut map = HeaderMap::new();
    assert!(map.is_empty());

    map.insert("Content-Type", "text/html");
    map.insert("host", "example.com");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("content-type"), Some("text/html"));
    assert_eq!(map.get("CONTENT-TYPE"), Some("text/html"));
    assert_eq!(map.get(standard::HOST), Some("example.com"));
    assert!(map.contains_key("Host"));
    assert!(!map.contains_key("Date"));
    assert_eq!(map.get("Date"), None);
}

#[test]
fn test_header_map_preserve_order_and_case() {
    let map: HeaderMap = [("X-First", "1"), ("x-second", "2"), ("X-THIRD", "3")]
        .into_iter()
        .collect();

    let fields = map.iter().collect::<Vec<_>>();
    assert_eq!(fields, [("X-First", "1"), ("x-second", "2"), ("X-THIRD", "3")]);
}

#[test]
fn test_header_map_insert_replace() {
    let mut map = HeaderMap::new();
    assert_eq!(map.insert("Accept", "text/html"), None);
    map.append("Date", "now");
    map.append("accept", "*/*");

    assert_eq!(map.insert("ACCEPT", "image/png").as_deref(), Some("text/html"));
    assert_eq!(map.len(), 2);
    assert_eq!(map.iter().next(), Some(("ACCEPT", "image/png")));
    assert_eq!(map.get_all("accept").count(), 1);
}

#[test]
fn test_header_map_append_and_remove() {
    let mut map = HeaderMap::with_capacity(4);
    map.append("Via", "a");
    map.append("Host", "b");
    map.append("via", "c");

    assert_eq!(map.get_all("VIA").collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(map.remove("Via").as_deref(), Some("a"));
    assert_eq!(map.len(), 1);
    assert_eq!(map.remove("Via"), None);

    map.clear();
    assert!(map.is_empty());
}

#[test]
fn test_header_map_token() {
    let mut map = HeaderMap::new();
    map.append("Connection", "keep-alive");
    map.append("connection", " Upgrade ,CLOSE");

    assert!(map.has_token(standard::CONNECTION, standard::CLOSE));
    assert!(map.has_token("Connection", "upgrade"));
    assert!(!map.has_token("Connection", "clo"));
    assert!(!map.has_token("Transfer-Encoding", "chunked"));
}
