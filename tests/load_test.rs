//! Concurrent load against a shared Dispatcher.

use axum::http::StatusCode;
use std::sync::Arc;
use std::time::Instant;

use resource_router::{Dispatcher, RouteGroup};

mod common;
use common::{body_text, get, Named};

fn test_dispatcher() -> Dispatcher {
    let mut group = RouteGroup::new("/test");
    group
        .add("/one/:param", Named { name: "one" })
        .add("/two/:param", Named { name: "two" });

    let mut dispatcher = Dispatcher::new();
    dispatcher.add_group(group);
    dispatcher
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatch() {
    let dispatcher = Arc::new(test_dispatcher());
    let requests = 1000;

    let start = Instant::now();
    let mut tasks = Vec::with_capacity(requests * 2);
    for _ in 0..requests {
        for (path, expected) in [("/test/one/1", "one:1"), ("/test/two/2", "two:2")] {
            let dispatcher = Arc::clone(&dispatcher);
            tasks.push(tokio::spawn(async move {
                let response = dispatcher.dispatch(get(path)).await;
                assert_eq!(response.status(), StatusCode::OK);
                assert_eq!(body_text(response).await, expected);
            }));
        }
    }

    for task in tasks {
        task.await.expect("dispatch task panicked");
    }
    let elapsed = start.elapsed();

    println!("Dispatched {} requests in {:?}", requests * 2, elapsed);
    assert_eq!(dispatcher.cache().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatch_without_cache() {
    let mut dispatcher = test_dispatcher();
    dispatcher.set_use_cache(false);
    let dispatcher = Arc::new(dispatcher);

    let mut tasks = Vec::new();
    for i in 0..200 {
        let dispatcher = Arc::clone(&dispatcher);
        tasks.push(tokio::spawn(async move {
            let response = dispatcher.dispatch(get(&format!("/test/one/{i}"))).await;
            assert_eq!(body_text(response).await, format!("one:{i}"));
        }));
    }

    for task in tasks {
        task.await.expect("dispatch task panicked");
    }
    assert!(dispatcher.cache().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_never_cached() {
    let dispatcher = Arc::new(test_dispatcher());

    let mut tasks = Vec::new();
    for i in 0..200 {
        let dispatcher = Arc::clone(&dispatcher);
        tasks.push(tokio::spawn(async move {
            let response = dispatcher.dispatch(get(&format!("/absent/{i}"))).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }));
    }

    for task in tasks {
        task.await.expect("dispatch task panicked");
    }
    assert!(dispatcher.cache().is_empty());
}
