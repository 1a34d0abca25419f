//! # Domain Entities Module
//!
//! 비즈니스 도메인의 핵심 엔티티들을 정의합니다.
//! Spring Framework의 JPA Entity와 유사한 역할을 하며, PostgreSQL `users` 테이블의
//! 한 행과 대응되는 데이터 구조체를 포함합니다.
//!
//! ## 주요 역할
//!
//! - **도메인 모델링**: 사용자, 주소, 생명주기 상태
//! - **검증 규칙**: `validator` derive 기반 필드 규칙과 고정 순서 보고
//! - **직렬화/역직렬화**: JSON ↔ Rust 구조체 변환
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 이 모듈
//! ├── events/       ← 메시지 스트림 이벤트
//! └── dto/          ← 데이터 전송 객체
//! ```

pub mod users;
