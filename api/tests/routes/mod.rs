mod auth_test;
mod me_test;
mod qr_test;
