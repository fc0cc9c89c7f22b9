pub mod host_handshake;
