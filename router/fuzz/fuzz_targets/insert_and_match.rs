#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<(bool, String, i32)>, String, Option<String>)| {
    let mut router = trie_router::Router::new();

    for (post, path, item) in data.0 {
        let method = if post { "POST" } else { "GET" };
        if router.insert(method, path, item).is_err() {
            return;
        }
    }

    let _ = router.at("GET", &data.1);

    if let Some(path) = data.2 {
        router.remove("GET", &path);
        let _ = router.at("GET", &data.1);
    }
});
