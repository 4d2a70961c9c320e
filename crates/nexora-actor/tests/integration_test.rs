use async_trait::async_trait;
use nexora_actor::{ActorEntity, FrameworkError, ResourceActor, ResourceClient};

// --- Test entity: a coupon with a unique code ---

#[derive(Clone, Debug, PartialEq)]
struct Coupon {
    id: u32,
    code: String,
    percent_off: u8,
    redeemed: bool,
}

#[derive(Debug)]
struct CouponCreate {
    code: String,
    percent_off: u8,
}

#[derive(Debug)]
struct CouponUpdate {
    percent_off: Option<u8>,
}

#[derive(Debug)]
enum CouponAction {
    Redeem,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum CouponError {
    #[error("Discount must be between 1 and 90")]
    InvalidDiscount,
    #[error("Coupon already redeemed")]
    AlreadyRedeemed,
    #[error("Redeemed coupons cannot be deleted")]
    Locked,
}

#[async_trait]
impl ActorEntity for Coupon {
    type Id = u32;
    type Create = CouponCreate;
    type Update = CouponUpdate;
    type Action = CouponAction;
    type ActionResult = bool;
    type Context = ();
    type Error = CouponError;

    fn from_create_params(id: u32, params: CouponCreate) -> Result<Self, Self::Error> {
        if !(1..=90).contains(&params.percent_off) {
            return Err(CouponError::InvalidDiscount);
        }
        Ok(Self {
            id,
            code: params.code,
            percent_off: params.percent_off,
            redeemed: false,
        })
    }

    fn conflicts_with(&self, existing: &Self) -> bool {
        self.code == existing.code
    }

    async fn on_update(
        &mut self,
        update: CouponUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(p) = update.percent_off {
            if !(1..=90).contains(&p) {
                return Err(CouponError::InvalidDiscount);
            }
            self.percent_off = p;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if self.redeemed {
            return Err(CouponError::Locked);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CouponAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            CouponAction::Redeem => {
                if self.redeemed {
                    return Err(CouponError::AlreadyRedeemed);
                }
                self.redeemed = true;
                Ok(true)
            }
        }
    }
}

// --- Entity keyed by its owner, like a cart ---

#[derive(Clone, Debug)]
struct Basket {
    owner: u32,
}

#[derive(Debug)]
struct BasketCreate {
    owner: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("basket error")]
struct BasketError;

#[async_trait]
impl ActorEntity for Basket {
    type Id = u32;
    type Create = BasketCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = BasketError;

    fn from_create_params(id: u32, _params: BasketCreate) -> Result<Self, Self::Error> {
        Ok(Self { owner: id })
    }

    fn natural_id(params: &BasketCreate) -> Option<u32> {
        Some(params.owner)
    }

    async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn start() -> ResourceClient<Coupon> {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));
    client
}

fn coupon(code: &str, percent_off: u8) -> CouponCreate {
    CouponCreate {
        code: code.into(),
        percent_off,
    }
}

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let client = start();

    let id = client.create(coupon("DIWALI10", 10)).await.unwrap();
    assert_eq!(id, 1);

    assert!(client.perform_action(id, CouponAction::Redeem).await.unwrap());
    let stored = client.get(id).await.unwrap().unwrap();
    assert!(stored.redeemed);

    let again = client
        .perform_action(id, CouponAction::Redeem)
        .await
        .unwrap_err()
        .downcast_entity::<CouponError>()
        .unwrap();
    assert_eq!(again, CouponError::AlreadyRedeemed);

    let updated = client
        .update(
            id,
            CouponUpdate {
                percent_off: Some(15),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.percent_off, 15);

    // Redeemed coupons refuse deletion and stay in the store.
    let err = client.delete(id).await.unwrap_err();
    assert!(matches!(err, FrameworkError::EntityError(_)));
    assert!(client.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_failed_create_does_not_store() {
    let client = start();

    let err = client.create(coupon("HUGE", 99)).await.unwrap_err();
    assert_eq!(
        err.downcast_entity::<CouponError>().unwrap(),
        CouponError::InvalidDiscount
    );
    assert!(client.query(|_| true).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_conflicting_create_is_rejected() {
    let client = start();

    let first = client.create(coupon("SALE", 20)).await.unwrap();
    let err = client.create(coupon("SALE", 30)).await.unwrap_err();
    match err {
        FrameworkError::Conflict(existing) => assert_eq!(existing, first.to_string()),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(client.query(|_| true).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_conflicting_creates_admit_one() {
    let client = start();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.create(coupon("FLASH", 5)).await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            ok += 1;
        }
    }
    assert_eq!(ok, 1);
}

#[tokio::test]
async fn test_query_returns_matches_in_id_order() {
    let client = start();
    for (code, pct) in [("A", 5), ("B", 50), ("C", 25), ("D", 60)] {
        client.create(coupon(code, pct)).await.unwrap();
    }

    let big: Vec<String> = client
        .query(|c: &Coupon| c.percent_off >= 25)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.code)
        .collect();
    assert_eq!(big, vec!["B", "C", "D"]);
}

#[tokio::test]
async fn test_missing_ids_report_not_found() {
    let client = start();

    assert!(client.get(42).await.unwrap().is_none());
    assert!(matches!(
        client.update(42, CouponUpdate { percent_off: None }).await,
        Err(FrameworkError::NotFound(id)) if id == "42"
    ));
    assert!(matches!(
        client.perform_action(42, CouponAction::Redeem).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client.delete(42).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_natural_id_is_used_and_unique() {
    let (actor, client) = ResourceActor::<Basket>::new(10);
    tokio::spawn(actor.run(()));

    assert_eq!(client.create(BasketCreate { owner: 77 }).await.unwrap(), 77);
    assert_eq!(client.get(77).await.unwrap().unwrap().owner, 77);
    assert!(matches!(
        client.create(BasketCreate { owner: 77 }).await,
        Err(FrameworkError::Conflict(_))
    ));
}

#[tokio::test]
async fn test_dropped_actor_reports_closed() {
    let (actor, client) = ResourceActor::<Coupon>::new(10);
    drop(actor);

    assert!(matches!(
        client.get(1).await,
        Err(FrameworkError::ActorClosed)
    ));
}
