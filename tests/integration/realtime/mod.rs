//! Chat WebSocket integration tests

mod websocket_test;
