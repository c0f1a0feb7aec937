//! Chain solver (§4.7, C7): HMM-style max-a-posteriori way assignment.
//!
//! Samples flow through already grouped by nothing more than CSV order; a
//! chain is a maximal run sharing the same `(user_id, device_id)` pair.
//! Within a chain, a further split happens at any sample with zero
//! candidates — that sample cannot contribute a unary term, so the edges
//! touching it would need an "uninformative" pairwise potential. Rather than
//! special-case a link with no useful information, each maximal run of
//! samples that all have at least one candidate is solved independently;
//! the zero-candidate samples between runs are simply left unmatched.

use obs_core::sample::{Candidate, Sample};

const UNARY_DISTANCE_SCALE_M: f64 = 100.0;
const P_SAME: f64 = 0.999;
const P_CHANGE: f64 = 0.001;

fn identity_changed(a: &Sample, b: &Sample) -> bool {
    a.user_id != b.user_id || a.device_id != b.device_id
}

/// Run the chain solver over an entire ordered sample stream, splitting on
/// user/device changes and assigning one candidate (or none) per sample.
pub fn solve_chains(samples: &mut [Sample]) {
    let mut chain_start = 0;
    for i in 1..=samples.len() {
        if i == samples.len() || identity_changed(&samples[i - 1], &samples[i]) {
            solve_single_chain(&mut samples[chain_start..i]);
            chain_start = i;
        }
    }
}

fn solve_single_chain(chain: &mut [Sample]) {
    let n = chain.len();
    let mut run_start = 0;
    for i in 0..=n {
        let empty_here = i < n && chain[i].candidates.is_empty();
        if i == n || empty_here {
            if i > run_start {
                solve_run(&mut chain[run_start..i]);
            }
            if i < n {
                chain[i].clear_annotation();
            }
            run_start = i + 1;
        }
    }
}

/// Unary log-potentials for one sample's candidates: `exp(-d/a)` normalized
/// to sum to 1, then logged (§4.7).
fn unary_log(candidates: &[Candidate]) -> Vec<f64> {
    let raw: Vec<f64> = candidates.iter().map(|c| (-c.lateral_distance_m / UNARY_DISTANCE_SCALE_M).exp()).collect();
    let sum: f64 = raw.iter().sum();
    raw.iter().map(|&v| (v / sum).ln()).collect()
}

fn pairwise_log(a: &[Candidate], b: &[Candidate]) -> Vec<Vec<f64>> {
    a.iter()
        .map(|ca| b.iter().map(|cb| if ca.matching_id == cb.matching_id { P_SAME.ln() } else { P_CHANGE.ln() }).collect())
        .collect()
}

/// Forward-backward max-product in log-space over one run of samples that
/// all have at least one candidate, then pick each sample's arg-max label
/// (ties go to the lower, i.e. closer, candidate index).
fn solve_run(run: &mut [Sample]) {
    let n = run.len();
    if n == 0 {
        return;
    }
    let phi: Vec<Vec<f64>> = run.iter().map(|s| unary_log(&s.candidates)).collect();
    if n == 1 {
        assign(&mut run[0], 0);
        return;
    }
    let psi: Vec<Vec<Vec<f64>>> = (0..n - 1).map(|i| pairwise_log(&run[i].candidates, &run[i + 1].candidates)).collect();

    let mut m_fwd: Vec<Vec<f64>> = Vec::with_capacity(n);
    m_fwd.push(vec![0.0; phi[0].len()]);
    for i in 1..n {
        let k_len = phi[i - 1].len();
        let l_len = phi[i].len();
        let mut msg = vec![f64::NEG_INFINITY; l_len];
        for l in 0..l_len {
            for k in 0..k_len {
                let val = m_fwd[i - 1][k] + phi[i - 1][k] + psi[i - 1][k][l];
                if val > msg[l] {
                    msg[l] = val;
                }
            }
        }
        m_fwd.push(msg);
    }

    let mut m_bwd: Vec<Vec<f64>> = vec![Vec::new(); n];
    m_bwd[n - 1] = vec![0.0; phi[n - 1].len()];
    for i in (0..n - 1).rev() {
        let l_len = phi[i + 1].len();
        let k_len = phi[i].len();
        let mut msg = vec![f64::NEG_INFINITY; k_len];
        for k in 0..k_len {
            for l in 0..l_len {
                let val = m_bwd[i + 1][l] + phi[i + 1][l] + psi[i][k][l];
                if val > msg[k] {
                    msg[k] = val;
                }
            }
        }
        m_bwd[i] = msg;
    }

    for i in 0..n {
        let mut best_idx = 0;
        let mut best_val = f64::NEG_INFINITY;
        for k in 0..phi[i].len() {
            let t = phi[i][k] + m_fwd[i][k] + m_bwd[i][k];
            if t > best_val {
                best_val = t;
                best_idx = k;
            }
        }
        assign(&mut run[i], best_idx);
    }
}

fn assign(sample: &mut Sample, idx: usize) {
    let c = sample.candidates[idx].clone();
    sample.way_id = Some(c.way_id);
    sample.way_orientation = Some(c.orientation);
    sample.latitude_projected = Some(c.latitude);
    sample.longitude_projected = Some(c.longitude);
    sample.distance_projected = Some(c.lateral_distance_m);
    sample.candidates.clear();
}
