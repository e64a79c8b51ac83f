use std::{fmt, str::FromStr};

use percent_encoding::percent_decode_str;
use url::{Host, ParseError, Url};

use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 6379;

/// A parsed target identifier.
///
/// Accepts `redis://[[username][:password]@]host[:port][/db]` as well as a bare `host[:port]`.
/// Credentials are percent-decoded. Parsing never touches the network.
#[derive(Clone, PartialEq, Eq)]
pub struct Target {
	pub host: String,
	pub port: u16,
	pub username: Option<String>,
	pub password: Option<String>,
	pub db: u32,
}

impl Target {
	pub fn parse(target: &str) -> Result<Self> {
		let invalid = |reason: &'static str| Error::InvalidTarget {
			target: target.to_owned(),
			reason,
		};

		// a bare `host:port` would otherwise read as scheme `host`
		let url = if target.contains("://") {
			Url::parse(target)
		} else {
			Url::parse(&format!("redis://{target}"))
		}
		.map_err(|err| match err {
			ParseError::InvalidPort => invalid("invalid port"),
			ParseError::InvalidIpv6Address => invalid("invalid IPv6 address"),
			_ => invalid("malformed URL"),
		})?;

		match url.scheme() {
			"redis" => {}
			"rediss" => return Err(invalid("TLS targets are not supported")),
			_ => return Err(invalid("unsupported scheme")),
		}

		let host = match url.host() {
			Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_owned(),
			Some(Host::Ipv4(addr)) => addr.to_string(),
			Some(Host::Ipv6(addr)) => addr.to_string(),
			_ => "localhost".to_owned(),
		};

		let decode = |component: &str| -> Result<Option<String>> {
			let decoded = percent_decode_str(component)
				.decode_utf8()
				.map_err(|_| invalid("credentials are not valid UTF-8"))?;
			Ok((!decoded.is_empty()).then(|| decoded.into_owned()))
		};
		let username = decode(url.username())?;
		let password = match url.password() {
			Some(password) => decode(password)?,
			None => None,
		};

		let db = match url.path().trim_matches('/') {
			"" => 0,
			db => db.parse().map_err(|_| invalid("invalid database index"))?,
		};

		Ok(Self {
			host,
			port: url.port().unwrap_or(DEFAULT_PORT),
			username,
			password,
			db,
		})
	}

	/// Address suitable for [tokio::net::TcpStream::connect].
	pub fn addr(&self) -> (&str, u16) {
		(self.host.as_str(), self.port)
	}
}

impl FromStr for Target {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

/// Never includes credentials.
impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.host.contains(':') {
			write!(f, "redis://[{}]:{}/{}", self.host, self.port, self.db)
		} else {
			write!(f, "redis://{}:{}/{}", self.host, self.port, self.db)
		}
	}
}

impl fmt::Debug for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Target")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("username", &self.username)
			.field("password", &self.password.as_ref().map(|_| "<redacted>"))
			.field("db", &self.db)
			.finish()
	}
}
