//! # User Data Transfer Objects Module
//!
//! 사용자 관련 API의 요청/응답 데이터 구조를 정의하는 모듈입니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! users/
//! ├── request/                    # 클라이언트 → 서버
//! │   └── paging_params.rs        # offset/limit/sort/order 해석 + 추출자
//! └── response/                   # 서버 → 클라이언트
//!     └── user_list_response.rs   # { meta, data } 목록 응답
//! ```
//!
//! ## Spring과의 비교
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `Pageable` + `@PageableDefault` | `PagingParams` (`FromRequest`) |
//! | `Page<UserDto>` | `UserListResponse` |

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
