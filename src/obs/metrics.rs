// self
use crate::{obs::ConnectOutcome, provider::Provider};

/// Records a connect outcome via the global metrics recorder (when enabled).
pub fn record_connect_outcome(provider: Provider, outcome: ConnectOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"link_broker_connect_total",
			"provider" => provider.slug(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (provider, outcome);
	}
}
