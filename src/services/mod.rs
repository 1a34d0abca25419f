//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `web::Data`로 핸들러에 주입되며, 저장소와 발행자를
//! 트레이트 객체로 받아 테스트에서 쉽게 교체할 수 있습니다.

pub mod users;
