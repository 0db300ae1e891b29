pub mod health;
pub mod submit_request;

#[allow(dead_code)]
fn _assert_multipart_send() {
    use axum::extract::Multipart;

    fn assert_send<T: Send>() {}
    assert_send::<Multipart>();
}
