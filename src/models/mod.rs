pub mod order;
pub mod package;
pub mod suggestion;
pub mod verification;

pub use order::{
    CalculationTarget, Leftover, OrderLine, OrderRequest, OrderResult, OrderWarning,
    PackageYield, SandwichKind, SandwichOrder,
};
pub use package::{Capacity, Ingredient, Package};
pub use suggestion::{PackageSize, Suggestion, WasteDetail};
pub use verification::{
    CheckKind, Discrepancy, MathDetails, PackageFacts, PriorResult, Quantities,
    ReportedQuantity, VerificationCheck, VerificationReport, VerificationRequest,
    VerificationStatus,
};
