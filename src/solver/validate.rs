//! Input checks shared by both solvers.

use std::collections::HashSet;

use crate::error::{RoutingError, RoutingResult};
use crate::models::{Coordinate, Order, Vehicle};

/// Rejects a depot outside the valid coordinate range.
pub(crate) fn check_depot(depot: Coordinate) -> RoutingResult<()> {
    check_coordinate("depot".to_string(), depot)
}

/// Rejects malformed orders: bad coordinates, repeated ids, zero demand.
pub(crate) fn check_orders(orders: &[Order]) -> RoutingResult<()> {
    let mut seen = HashSet::with_capacity(orders.len());
    for order in orders {
        check_coordinate(format!("order {}", order.id()), order.location())?;
        if !seen.insert(order.id()) {
            return Err(RoutingError::DuplicateId {
                kind: "order",
                id: order.id().to_string(),
            });
        }
        if order.demand() == 0 {
            return Err(RoutingError::ZeroDemand {
                order_id: order.id().to_string(),
            });
        }
    }
    Ok(())
}

/// Rejects orders whose location is outside the valid range.
pub(crate) fn check_order_locations(orders: &[Order]) -> RoutingResult<()> {
    orders
        .iter()
        .try_for_each(|o| check_coordinate(format!("order {}", o.id()), o.location()))
}

/// Rejects malformed vehicles: bad start coordinates or repeated ids.
pub(crate) fn check_vehicles(vehicles: &[Vehicle]) -> RoutingResult<()> {
    let mut seen = HashSet::with_capacity(vehicles.len());
    for vehicle in vehicles {
        check_coordinate(format!("vehicle {}", vehicle.id()), vehicle.start())?;
        if !seen.insert(vehicle.id()) {
            return Err(RoutingError::DuplicateId {
                kind: "vehicle",
                id: vehicle.id().to_string(),
            });
        }
    }
    Ok(())
}

fn check_coordinate(input: String, c: Coordinate) -> RoutingResult<()> {
    if c.is_valid() {
        Ok(())
    } else {
        Err(RoutingError::InvalidCoordinate {
            input,
            latitude: c.latitude(),
            longitude: c.longitude(),
        })
    }
}
