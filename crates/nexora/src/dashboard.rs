//! Seller dashboard read model.
//!
//! Nothing is stored here: each call queries the product and order actors and
//! aggregates over the seller's own lines. Only `CONFIRMED`, `SHIPPED` and
//! `DELIVERED` orders count as sales.

use crate::clients::{OrderClient, ProductClient};
use crate::model::{Currency, Order, Price, Product, ProductId, ProductQuery, UserId};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::instrument;

const TOP_PRODUCTS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Order(#[from] OrderError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub id: ProductId,
    pub title: String,
    pub sold: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerMetrics {
    /// Units sold.
    pub sales: u64,
    /// One entry per currency the seller has sold in.
    pub revenue: Vec<Price>,
    pub top_products: Vec<TopProduct>,
}

#[derive(Clone)]
pub struct SellerDashboard {
    products: ProductClient,
    orders: OrderClient,
}

impl SellerDashboard {
    pub fn new(products: ProductClient, orders: OrderClient) -> Self {
        Self { products, orders }
    }

    #[instrument(skip(self))]
    pub async fn products(&self, seller: UserId) -> Result<Vec<Product>, DashboardError> {
        Ok(self
            .products
            .search(ProductQuery {
                seller: Some(seller),
                ..Default::default()
            })
            .await?)
    }

    /// Orders with at least one of the seller's products, narrowed to those
    /// lines, newest first.
    #[instrument(skip(self))]
    pub async fn orders(&self, seller: UserId) -> Result<Vec<Order>, DashboardError> {
        let catalogue = self.product_ids(seller).await?;
        if catalogue.is_empty() {
            return Ok(Vec::new());
        }
        let mut orders = self.orders.containing_any(catalogue.clone()).await?;
        for order in &mut orders {
            order.items.retain(|line| catalogue.contains(&line.product));
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn metrics(&self, seller: UserId) -> Result<SellerMetrics, DashboardError> {
        let products = self.products(seller).await?;
        let titles: HashMap<ProductId, String> =
            products.into_iter().map(|p| (p.id, p.title)).collect();
        if titles.is_empty() {
            return Ok(SellerMetrics {
                sales: 0,
                revenue: Vec::new(),
                top_products: Vec::new(),
            });
        }

        let orders = self
            .orders
            .containing_any(titles.keys().copied().collect())
            .await?;

        let mut sales = 0u64;
        let mut revenue: BTreeMap<String, (Currency, f64)> = BTreeMap::new();
        let mut sold: BTreeMap<ProductId, u64> = BTreeMap::new();
        for order in orders.iter().filter(|o| o.status.is_fulfilled()) {
            for line in order.items.iter().filter(|l| titles.contains_key(&l.product)) {
                let units = u64::from(line.quantity);
                sales += units;
                *sold.entry(line.product).or_default() += units;
                revenue
                    .entry(line.price.currency.to_string())
                    .or_insert((line.price.currency, 0.0))
                    .1 += line.price.amount;
            }
        }

        let mut ranked: Vec<(ProductId, u64)> = sold.into_iter().collect();
        // Stable sort keeps ascending ID order among equal unit counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let top_products = ranked
            .into_iter()
            .take(TOP_PRODUCTS)
            .map(|(id, sold)| TopProduct {
                id,
                title: titles.get(&id).cloned().unwrap_or_default(),
                sold,
            })
            .collect();

        Ok(SellerMetrics {
            sales,
            revenue: revenue
                .into_values()
                .map(|(currency, amount)| Price::new(amount, currency))
                .collect(),
            top_products,
        })
    }

    async fn product_ids(&self, seller: UserId) -> Result<BTreeSet<ProductId>, DashboardError> {
        Ok(self.products(seller).await?.into_iter().map(|p| p.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        OrderCreate, OrderId, OrderItem, OrderStatus, ProductCreate, ShippingAddress,
    };
    use nexora_actor::mock::MockClient;

    fn product(id: u32, seller: u32) -> Product {
        Product::new(
            ProductId(id),
            ProductCreate {
                title: format!("Item {id}"),
                description: None,
                price: Price::new(100.0, Currency::Inr),
                stock: 10,
                seller: UserId(seller),
                images: vec![],
            },
        )
    }

    fn order(id: u32, status: OrderStatus, lines: &[(u32, u32)]) -> Order {
        let mut o = Order::new(
            OrderId(id),
            OrderCreate {
                user: UserId(1),
                shipping_address: ShippingAddress {
                    street: "1 MG Road".into(),
                    city: "Pune".into(),
                    state: "MH".into(),
                    pincode: "411001".into(),
                    country: "India".into(),
                },
            },
        );
        o.status = status;
        o.items = lines
            .iter()
            .map(|&(product, quantity)| OrderItem {
                product: ProductId(product),
                quantity,
                price: Price::new(100.0 * f64::from(quantity), Currency::Inr),
            })
            .collect();
        o
    }

    fn dashboard(
        products: Vec<Product>,
        orders: Vec<Order>,
    ) -> (SellerDashboard, MockClient<Product>, MockClient<Order>) {
        let mut product_mock = MockClient::<Product>::new();
        product_mock.expect_query().return_ok(products);
        let mut order_mock = MockClient::<Order>::new();
        order_mock.expect_query().return_ok(orders);
        let dashboard = SellerDashboard::new(
            ProductClient::new(product_mock.client()),
            OrderClient::new(order_mock.client()),
        );
        (dashboard, product_mock, order_mock)
    }

    #[tokio::test]
    async fn metrics_count_only_fulfilled_orders_and_own_lines() {
        let (dashboard, products, orders) = dashboard(
            vec![product(1, 9), product(2, 9)],
            vec![
                // Product 3 belongs to someone else.
                order(1, OrderStatus::Confirmed, &[(1, 2), (3, 5)]),
                order(2, OrderStatus::Delivered, &[(2, 2)]),
                order(3, OrderStatus::Pending, &[(1, 7)]),
                order(4, OrderStatus::Cancelled, &[(2, 1)]),
            ],
        );

        let metrics = dashboard.metrics(UserId(9)).await.unwrap();
        assert_eq!(metrics.sales, 4);
        assert_eq!(metrics.revenue, vec![Price::new(400.0, Currency::Inr)]);
        // Equal units: lower product ID first.
        let top: Vec<_> = metrics.top_products.iter().map(|t| (t.id, t.sold)).collect();
        assert_eq!(top, vec![(ProductId(1), 2), (ProductId(2), 2)]);
        products.verify();
        orders.verify();
    }

    #[tokio::test]
    async fn orders_are_narrowed_to_the_sellers_lines() {
        let (dashboard, _products, _orders) = dashboard(
            vec![product(1, 9)],
            vec![order(1, OrderStatus::Pending, &[(1, 1), (3, 5)])],
        );

        let orders = dashboard.orders(UserId(9)).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items.len(), 1);
        assert_eq!(orders[0].items[0].product, ProductId(1));
    }

    #[tokio::test]
    async fn seller_without_products_has_empty_metrics() {
        let mut product_mock = MockClient::<Product>::new();
        product_mock.expect_query().return_ok(vec![]);
        let dashboard = SellerDashboard::new(
            ProductClient::new(product_mock.client()),
            OrderClient::new(MockClient::new().client()),
        );

        let metrics = dashboard.metrics(UserId(9)).await.unwrap();
        assert_eq!(metrics.sales, 0);
        assert!(metrics.top_products.is_empty());
    }
}
