//! Characteristic decomposition of the fields arriving at an interface.
//!
//! Each block sends an outgoing characteristic `s - z v` (plus side) or
//! `s + z v` (minus side) into the interface. Eliminating the unknown
//! face velocities leaves one relation per component between interface
//! traction `S` and velocity jump `V = V+ - V-`:
//!
//! ```text
//! S = phi - eta V
//! phi = (z+ s- + z- s+) / (z- + z+) + eta (v+ - v-)
//! eta = z- z+ / (z- + z+)
//! ```
//!
//! `phi` is the traction the interface would carry if it were locked.
//! The normal component uses P impedances, the tangential components S
//! impedances.

use rupture_core::{BoundaryFieldPair, InterfaceError, InterfaceId, LocalVector, PointKey};
use rupture_interface::InterfaceContext;

/// Stress-transfer functional and radiation damping at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StressTransfer {
    /// Locked-interface traction per component.
    pub phi: LocalVector,
    /// Radiation damping for the normal component.
    pub eta_n: f64,
    /// Radiation damping for the tangential components.
    pub eta_s: f64,
}

fn component(
    s_minus: f64,
    s_plus: f64,
    v_minus: f64,
    v_plus: f64,
    z_minus: f64,
    z_plus: f64,
) -> (f64, f64) {
    let eta = z_minus * z_plus / (z_minus + z_plus);
    let phi =
        (z_plus * s_minus + z_minus * s_plus) / (z_minus + z_plus) + eta * (v_plus - v_minus);
    (phi, eta)
}

/// Compute `phi` and `eta` from the two-sided field state.
pub fn stress_transfer(pair: &BoundaryFieldPair) -> StressTransfer {
    let (m, p) = (&pair.minus, &pair.plus);
    let (zm, zp) = (&pair.z_minus, &pair.z_plus);
    let (phi_n, eta_n) = component(m.s.n, p.s.n, m.v.n, p.v.n, zm.zp, zp.zp);
    let (phi_2, eta_s) = component(m.s.t2, p.s.t2, m.v.t2, p.v.t2, zm.zs, zp.zs);
    let (phi_3, _) = component(m.s.t3, p.s.t3, m.v.t3, p.v.t3, zm.zs, zp.zs);
    StressTransfer {
        phi: LocalVector::new(phi_n, phi_2, phi_3),
        eta_n,
        eta_s,
    }
}

/// Face velocities consistent with interface traction `s` (field part,
/// load excluded), from each side's characteristic.
///
/// Returns `(V-, V+)` with `V- = v- + (S - s-)/z-` and
/// `V+ = v+ + (s+ - S)/z+`.
pub fn face_velocities(pair: &BoundaryFieldPair, s: LocalVector) -> (LocalVector, LocalVector) {
    let (m, p) = (&pair.minus, &pair.plus);
    let (zm, zp) = (&pair.z_minus, &pair.z_plus);
    let minus = LocalVector::new(
        m.v.n + (s.n - m.s.n) / zm.zp,
        m.v.t2 + (s.t2 - m.s.t2) / zm.zs,
        m.v.t3 + (s.t3 - m.s.t3) / zm.zs,
    );
    let plus = LocalVector::new(
        p.v.n + (p.s.n - s.n) / zp.zp,
        p.v.t2 + (p.s.t2 - s.t2) / zp.zs,
        p.v.t3 + (p.s.t3 - s.t3) / zp.zs,
    );
    (minus, plus)
}

/// Read the pair at `key` and reject missing, non-finite or
/// non-physical input.
pub(crate) fn checked_pair(
    ctx: &InterfaceContext<'_>,
    interface: &str,
    id: InterfaceId,
    key: PointKey,
) -> Result<BoundaryFieldPair, InterfaceError> {
    let pair = ctx
        .boundary()
        .pair(id, key)
        .ok_or_else(|| InterfaceError::MissingBoundary {
            interface: interface.to_string(),
            point: key,
        })?;
    if let Some(quantity) = pair.first_non_finite() {
        return Err(InterfaceError::NonFinite {
            interface: interface.to_string(),
            point: key,
            quantity,
            time: ctx.time(),
            step: ctx.step(),
        });
    }
    if !pair.z_minus.is_valid() || !pair.z_plus.is_valid() {
        return Err(InterfaceError::InvalidImpedance {
            interface: interface.to_string(),
            point: key,
            time: ctx.time(),
            step: ctx.step(),
        });
    }
    Ok(pair)
}
