use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, register_counter, register_counter_vec,
    register_gauge, register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("faucet_requests_total", "Total number of faucet requests").unwrap();
    pub static ref DISPENSED_TOTAL: Counter =
        register_counter!("faucet_dispensed_total", "Transfers submitted by the faucet").unwrap();
    pub static ref REJECTED_TOTAL: CounterVec = register_counter_vec!(
        "faucet_rejected_total",
        "Faucet requests that did not dispense, by reason",
        &["reason"]
    )
    .unwrap();
    pub static ref DISPENSE_LATENCY: Histogram = register_histogram!(
        "faucet_dispense_latency_seconds",
        "Time from request to submitted transfer"
    )
    .unwrap();
    pub static ref TRACKED_ADDRESSES: Gauge = register_gauge!(
        "faucet_tracked_addresses",
        "Addresses currently held in the cooldown map"
    )
    .unwrap();
}
