/// Column bounds shared by the request DTOs and the `varchar` definitions
/// of the `experiences` table.
pub const MAX_ROLE_LENGTH: u64 = 100;
pub const MAX_COMPANY_LENGTH: u64 = 100;
pub const MAX_DATE_LENGTH: u64 = 20;
