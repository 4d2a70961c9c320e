use crate::auth::{TokenDenylist, TokenService, BCRYPT_COST};
use crate::clients::{CartClient, OrderClient, PaymentClient, ProductClient, UserClient};
use crate::config::Config;
use crate::dashboard::SellerDashboard;
use crate::http::AppState;
use crate::images::{ImageError, ImageKitStore, ImageStore, MemoryImageStore};
use crate::notification::{Broker, Mailer, NotificationService, OutboxMailer};
use crate::payment_actor::{
    GatewayError, PaymentContext, PaymentGateway, RazorpayGateway, SandboxGateway,
};
use crate::{cart_actor, order_actor, payment_actor, product_actor, user_actor};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

const BROKER_CAPACITY: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("payment gateway: {0}")]
    Gateway(#[from] GatewayError),
    #[error("image store: {0}")]
    Images(#[from] ImageError),
}

/// The pluggable parts of a [`Marketplace`].
#[derive(Clone)]
pub struct Settings {
    pub actor_buffer: usize,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub gateway: Arc<dyn PaymentGateway>,
    /// Secret the gateway signs checkouts with.
    pub gateway_secret: String,
    pub images: Arc<dyn ImageStore>,
    pub mailer: Arc<dyn Mailer>,
    pub bcrypt_cost: u32,
}

impl Settings {
    /// Real gateway and image store when their keys are configured, offline
    /// stand-ins otherwise. Mail goes to the logging outbox.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let gateway: Arc<dyn PaymentGateway> = match &config.razorpay {
            Some(keys) => Arc::new(RazorpayGateway::new(
                keys.key_id.clone(),
                keys.key_secret.clone(),
            )?),
            None => Arc::new(SandboxGateway::new()),
        };
        let images: Arc<dyn ImageStore> = match &config.imagekit_private_key {
            Some(key) => Arc::new(ImageKitStore::new(key.clone())?),
            None => Arc::new(MemoryImageStore::new()),
        };

        Ok(Self {
            actor_buffer: config.actor_buffer,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl: config.token_ttl,
            gateway,
            gateway_secret: config.gateway_secret().to_string(),
            images,
            mailer: Arc::new(OutboxMailer::new()),
            bcrypt_cost: BCRYPT_COST,
        })
    }

    /// Fully offline settings: sandbox gateway, in-memory images, outbox mail.
    pub fn sandbox(jwt_secret: impl Into<String>) -> Self {
        Self {
            actor_buffer: 32,
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(86_400),
            gateway: Arc::new(SandboxGateway::new()),
            gateway_secret: crate::config::SANDBOX_KEY_SECRET.to_string(),
            images: Arc::new(MemoryImageStore::new()),
            mailer: Arc::new(OutboxMailer::new()),
            bcrypt_cost: BCRYPT_COST,
        }
    }
}

/// Every actor of the marketplace, running, plus the clients to reach them.
///
/// ```ignore
/// let market = Marketplace::start(Settings::sandbox("secret"));
/// let user = market.users.register(params).await?;
/// market.shutdown().await?;
/// ```
pub struct Marketplace {
    pub users: UserClient,
    pub products: ProductClient,
    pub carts: CartClient,
    pub orders: OrderClient,
    pub payments: PaymentClient,
    pub dashboard: SellerDashboard,
    pub tokens: TokenService,
    pub denylist: Arc<TokenDenylist>,
    images: Arc<dyn ImageStore>,
    bcrypt_cost: u32,
    broker: Broker,
    actors: Vec<(&'static str, JoinHandle<()>)>,
    notifications: JoinHandle<()>,
}

impl Marketplace {
    /// Spawns the actors and the notification service. Must run inside a Tokio runtime.
    pub fn start(settings: Settings) -> Self {
        let buffer = settings.actor_buffer;
        let broker = Broker::new(BROKER_CAPACITY);

        // Subscribe before any actor can publish.
        let notifications = tokio::spawn(NotificationService::new(&broker, settings.mailer).run());

        let (user_actor, users) = user_actor::new(buffer);
        let (product_actor, products) = product_actor::new(buffer);
        let (cart_actor, carts) = cart_actor::new(buffer);
        let (order_actor, orders) = order_actor::new(buffer);
        let (payment_actor, payments) = payment_actor::new(buffer);

        let users = UserClient::new(users);
        let products = ProductClient::new(products);
        let carts = CartClient::new(carts);
        let orders = OrderClient::new(orders);
        let payments = PaymentClient::new(payments);

        let payment_ctx = PaymentContext {
            orders: orders.clone(),
            users: users.clone(),
            gateway: settings.gateway,
            broker: broker.clone(),
            key_secret: settings.gateway_secret,
        };

        let actors = vec![
            ("payment", tokio::spawn(payment_actor.run(payment_ctx))),
            (
                "order",
                tokio::spawn(order_actor.run((carts.clone(), products.clone()))),
            ),
            ("user", tokio::spawn(user_actor.run(broker.clone()))),
            ("cart", tokio::spawn(cart_actor.run(()))),
            ("product", tokio::spawn(product_actor.run(()))),
        ];
        info!(buffer, "Marketplace started");

        Self {
            dashboard: SellerDashboard::new(products.clone(), orders.clone()),
            users,
            products,
            carts,
            orders,
            payments,
            tokens: TokenService::new(&settings.jwt_secret, settings.token_ttl),
            denylist: Arc::new(TokenDenylist::new(settings.token_ttl)),
            images: settings.images,
            bcrypt_cost: settings.bcrypt_cost,
            broker,
            actors,
            notifications,
        }
    }

    /// Handler state sharing this marketplace's clients.
    pub fn app_state(&self) -> AppState {
        AppState {
            users: self.users.clone(),
            products: self.products.clone(),
            carts: self.carts.clone(),
            orders: self.orders.clone(),
            payments: self.payments.clone(),
            dashboard: self.dashboard.clone(),
            tokens: self.tokens.clone(),
            denylist: self.denylist.clone(),
            images: self.images.clone(),
            bcrypt_cost: self.bcrypt_cost,
        }
    }

    /// Drops every client and waits for each actor, then the notification
    /// service, to finish. Any [`AppState`] handed out must be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down marketplace...");

        drop(self.dashboard);
        drop(self.payments);
        drop(self.orders);
        drop(self.users);
        drop(self.carts);
        drop(self.products);

        for (name, handle) in self.actors {
            if let Err(e) = handle.await {
                error!(actor = name, "Actor task failed: {:?}", e);
                return Err(format!("{name} actor task failed: {e:?}"));
            }
        }

        // Actors that published held broker clones; this is the last one.
        drop(self.broker);
        if let Err(e) = self.notifications.await {
            error!("Notification task failed: {:?}", e);
            return Err(format!("notification task failed: {e:?}"));
        }

        info!("Marketplace shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SANDBOX_KEY_SECRET;

    #[tokio::test]
    async fn starts_and_stops_cleanly() {
        let market = Marketplace::start(Settings::sandbox("test-secret"));
        let state = market.app_state();
        assert!(state.products.search(Default::default()).await.unwrap().is_empty());
        drop(state);

        market.shutdown().await.unwrap();
    }

    #[test]
    fn settings_follow_config() {
        let config = Config::from_lookup(|key| match key {
            "JWT_SECRET_KEY" => Some("s".to_string()),
            "ACTOR_BUFFER" => Some("8".to_string()),
            _ => None,
        })
        .unwrap();
        let settings = Settings::from_config(&config).unwrap();
        assert_eq!(settings.actor_buffer, 8);
        assert_eq!(settings.gateway_secret, SANDBOX_KEY_SECRET);
        assert_eq!(settings.bcrypt_cost, BCRYPT_COST);
    }
}
