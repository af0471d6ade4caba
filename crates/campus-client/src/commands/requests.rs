use campus_store::{ProductStatus, PurchaseRequest, RequestStatus};
use tracing::info;

use super::{lock, require_user_id};
use crate::state::SharedState;

/// Ask to buy a product as the signed-in user.
pub fn request_item(state: &SharedState, product_id: &str) -> Result<PurchaseRequest, String> {
    let mut guard = lock(state)?;
    let buyer_id = require_user_id(&guard)?;

    let (seller_id, status) = guard
        .marketplace
        .find_product(product_id)
        .map(|p| (p.seller_id.clone(), p.status))
        .ok_or_else(|| "Product not found".to_string())?;

    if seller_id == buyer_id {
        return Err("You cannot request your own listing".into());
    }
    if status != ProductStatus::Available {
        return Err("This item is no longer available".into());
    }

    let request = guard
        .marketplace
        .create_purchase_request(product_id, &buyer_id, &seller_id);

    info!(request_id = %request.id, product_id, "Purchase request sent");
    Ok(request)
}

/// Accept or decline a request addressed to the signed-in seller.
/// Accepting marks the product sold.
pub fn respond_to_request(
    state: &SharedState,
    request_id: &str,
    accept: bool,
) -> Result<PurchaseRequest, String> {
    let mut guard = lock(state)?;
    let me = require_user_id(&guard)?;

    let request = guard
        .marketplace
        .find_purchase_request(request_id)
        .ok_or_else(|| "Request not found".to_string())?;
    if request.seller_id != me {
        return Err("Only the seller can respond to this request".into());
    }
    if request.status != RequestStatus::Pending {
        return Err("This request has already been answered".into());
    }

    let status = if accept {
        RequestStatus::Accepted
    } else {
        RequestStatus::Declined
    };

    let updated = guard
        .marketplace
        .update_purchase_request(request_id, status)
        .ok_or_else(|| "Request not found".to_string())?;

    info!(request_id, ?status, "Purchase request answered");
    Ok(updated)
}

/// Requests waiting on the signed-in seller.
pub fn list_incoming_requests(state: &SharedState) -> Result<Vec<PurchaseRequest>, String> {
    let guard = lock(state)?;
    let me = require_user_id(&guard)?;
    Ok(guard
        .marketplace
        .incoming_requests(&me)
        .into_iter()
        .cloned()
        .collect())
}

/// Requests the signed-in user has sent.
pub fn list_outgoing_requests(state: &SharedState) -> Result<Vec<PurchaseRequest>, String> {
    let guard = lock(state)?;
    let me = require_user_id(&guard)?;
    Ok(guard
        .marketplace
        .outgoing_requests(&me)
        .into_iter()
        .cloned()
        .collect())
}
