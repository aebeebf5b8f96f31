//! Concurrency tests for the command dispatcher.
//!
//! These tests verify that concurrent dispatches against shared state work
//! correctly, especially operations that touch the store and the interface
//! registry together.

use std::sync::Arc;

use async_trait::async_trait;

use confab::{
    BufferStore, Dispatcher, InterfaceRegistry, MemoryStore, Result, Server, ServerConnector,
    ServerInterface, UserIdentity,
};

/// Interface stub that accepts every protocol action.
struct StubInterface;

#[async_trait]
impl ServerInterface for StubInterface {
    async fn join(&self, _channel: &str, _password: Option<&str>) -> Result<()> {
        Ok(())
    }

    async fn part(&self, _channel: &str) -> Result<()> {
        Ok(())
    }

    async fn send_message(&self, _target: &str, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn change_nick(&self, _new_nick: &str) -> Result<()> {
        Ok(())
    }

    async fn quit(&self, _message: &str) -> Result<()> {
        Ok(())
    }
}

/// Connector stub that hands out [`StubInterface`]s.
struct StubConnector;

#[async_trait]
impl ServerConnector for StubConnector {
    async fn connect(&self, _server: &Server) -> Result<Arc<dyn ServerInterface>> {
        Ok(Arc::new(StubInterface))
    }
}

/// Setup a dispatcher over fresh in-memory state.
fn setup_dispatcher() -> (Arc<MemoryStore>, Arc<InterfaceRegistry>, Arc<Dispatcher>) {
    let store = Arc::new(MemoryStore::new());
    let interfaces = Arc::new(InterfaceRegistry::new());
    let dispatcher = Arc::new(Dispatcher::new(
        store.clone(),
        Arc::new(StubConnector),
        interfaces.clone(),
    ));
    (store, interfaces, dispatcher)
}

/// Create a server-owned channel buffer to dispatch from and return its ID.
async fn create_channel_buffer(store: &MemoryStore) -> i64 {
    let server = store
        .create_server(
            "irc.example.org",
            6697,
            true,
            UserIdentity::new("alice", "Alice Example", "alice"),
        )
        .await
        .unwrap();
    store.add_buffer("#rust", Some(server.id)).await.id
}

/// Test concurrent query commands for distinct nicks.
///
/// This test verifies that when queries for different nicks run concurrently,
/// each nick ends up with exactly one conversation buffer.
#[tokio::test]
async fn test_concurrent_query_distinct_nicks() {
    let (store, _interfaces, dispatcher) = setup_dispatcher();
    let buffer_id = create_channel_buffer(&store).await;
    let before = store.buffer_count().await;

    const NUM_QUERIES: usize = 10;

    // Dispatch queries concurrently using tokio::spawn
    let mut handles = Vec::new();
    for i in 0..NUM_QUERIES {
        let dispatcher_clone = Arc::clone(&dispatcher);
        let handle = tokio::spawn(async move {
            let line = format!("/query user{}", i);
            dispatcher_clone.dispatch(buffer_id, &line).await
        });
        handles.push(handle);
    }

    // Wait for all dispatches to complete
    let mut success_count = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            success_count += 1;
        }
    }

    // All dispatches should succeed
    assert_eq!(success_count, NUM_QUERIES, "All queries should succeed");

    // Verify each nick got exactly one buffer
    assert_eq!(
        store.buffer_count().await,
        before + NUM_QUERIES,
        "Each nick should get exactly one buffer"
    );
    for i in 0..NUM_QUERIES {
        let name = format!("user{}", i);
        assert!(
            store.find_buffer(&name, 1).await.is_some(),
            "Buffer for {} should exist",
            name
        );
    }
}

/// Test concurrent query commands for the same nick.
///
/// This test verifies that repeated queries for one nick collapse to a single
/// buffer even when they race.
#[tokio::test]
async fn test_concurrent_query_same_nick() {
    let (store, _interfaces, dispatcher) = setup_dispatcher();
    let buffer_id = create_channel_buffer(&store).await;
    let before = store.buffer_count().await;

    const NUM_QUERIES: usize = 10;

    let mut handles = Vec::new();
    for _ in 0..NUM_QUERIES {
        let dispatcher_clone = Arc::clone(&dispatcher);
        let handle =
            tokio::spawn(async move { dispatcher_clone.dispatch(buffer_id, "/query carol").await });
        handles.push(handle);
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Find-or-create runs under one store lock, so repeats collapse
    assert_eq!(
        store.buffer_count().await,
        before + 1,
        "Same nick should never get a second buffer"
    );
    assert!(store.find_buffer("carol", 1).await.is_some());
}

/// Test concurrent connect commands.
///
/// This test verifies that concurrent connects each create their own server
/// record and register their own interface.
#[tokio::test]
async fn test_concurrent_connects() {
    let (store, interfaces, dispatcher) = setup_dispatcher();
    let buffer_id = store.add_buffer("status", None).await.id;

    const NUM_SERVERS: usize = 8;

    // Connect to distinct hosts concurrently, with full identity flags so
    // the system buffer is an acceptable origin
    let mut handles = Vec::new();
    for i in 0..NUM_SERVERS {
        let dispatcher_clone = Arc::clone(&dispatcher);
        let handle = tokio::spawn(async move {
            let line = format!(
                "/connect -n user{} -r User{} -u user{} irc{}.example.org",
                i, i, i, i
            );
            dispatcher_clone.dispatch(buffer_id, &line).await
        });
        handles.push(handle);
    }

    // Wait for all connects to complete
    let mut success_count = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            success_count += 1;
        }
    }

    // All connects should succeed
    assert_eq!(success_count, NUM_SERVERS, "All connects should succeed");

    // Verify each server has a registered interface
    assert_eq!(
        interfaces.count().await,
        NUM_SERVERS,
        "Each server should have a registered interface"
    );

    // Server IDs stay sequential under concurrency
    for id in 1..=NUM_SERVERS as i64 {
        assert!(
            store.server(id).await.is_some(),
            "Server {} should exist",
            id
        );
    }
}
