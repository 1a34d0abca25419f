//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈로, 비즈니스 규칙과 데이터 계약을 담당합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities      - User / Address / 코드 테이블 / 검증기
//! ├── Events        - USER_CREATED 이벤트 엔벨로프
//! └── DTOs          - 페이징 파라미터, 목록 응답
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, Messaging)
//! ```
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 시스템 | 역할 |
//! |--------|-----------|------|
//! | `@Entity` | `entities` 모듈 | 비즈니스 핵심 객체 |
//! | `ApplicationEvent` | `events` 모듈 | 도메인 이벤트 |
//! | `@RequestBody` / `@ResponseBody` | `dto` 모듈 | API 계약 정의 |
//! | `@Valid` | `validator` derive | 데이터 유효성 검사 |

pub mod dto;
pub mod entities;
pub mod events;
