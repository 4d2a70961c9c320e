use crate::model::UserId;

#[derive(Clone)]
pub enum PaymentAction {
    /// Checks the gateway signature and, when it holds, completes the payment
    /// and confirms the order. Answers with the updated payment.
    Verify {
        requested_by: UserId,
        payment_id: String,
        signature: String,
    },
}

impl std::fmt::Debug for PaymentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentAction::Verify {
                requested_by,
                payment_id,
                ..
            } => f
                .debug_struct("Verify")
                .field("requested_by", requested_by)
                .field("payment_id", payment_id)
                .finish_non_exhaustive(),
        }
    }
}
