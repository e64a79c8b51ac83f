use std::iter;

use futures::{SinkExt, TryStreamExt};
use resp::{codec::Codec, Data};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio_util::codec::{Decoder, Framed};
use tracing::instrument;

use crate::{
	command::{connection::Handshake, Command},
	Arg, Error, Result, Target,
};

/// A TCP connection to a Redis server.
///
/// Requests and replies are strictly paired. A connection whose reply is still unread, or which
/// saw an IO or framing failure, reports [Self::is_broken] and is never handed out again by a
/// pool.
#[derive(Debug)]
pub struct Connection {
	framed: Framed<TcpStream, Codec>,
	pending: usize,
	broken: bool,
}

impl Connection {
	/// Connect to the Redis server using the provided `addr`.
	pub async fn new(addr: impl ToSocketAddrs) -> Result<Self, std::io::Error> {
		let stream = TcpStream::connect(addr).await?;
		stream.set_nodelay(true)?;

		let framed = Codec.framed(stream);
		Ok(Self {
			framed,
			pending: 0,
			broken: false,
		})
	}

	/// Dial `target` and authenticate and select the database it names.
	#[instrument(level = "debug", skip_all, fields(addr = %target), err)]
	pub async fn open(target: &Target) -> Result<Self> {
		let mut conn = Self::new(target.addr())
			.await
			.map_err(|source| Error::Dial {
				target: target.to_string(),
				source,
			})?;

		conn.run(Handshake::from(target)).await?;
		Ok(conn)
	}

	/// Run a [Command] on this connection.
	pub async fn run<C>(&mut self, cmd: C) -> Result<C::Response>
	where
		C: Command + Send,
	{
		cmd.run(self).await
	}

	/// Send a command to the server, awaiting a single response.
	pub async fn cmd<'a, C, I>(&mut self, cmd: C) -> Result<Data<'static>>
	where
		C: IntoIterator<Item = &'a I>,
		I: 'a + AsRef<[u8]> + ?Sized,
	{
		self.send(Data::from_bytes_iter(cmd)).await?;
		self.read_cmd().await
	}

	/// Send the command `name` with typed arguments, awaiting a single response.
	pub async fn call(&mut self, name: &str, args: &[Arg<'_>]) -> Result<Data<'static>> {
		let data = Data::Array(
			iter::once(Data::bulk_string(name))
				.chain(args.iter().map(Arg::to_data))
				.collect(),
		);

		self.send(data).await?;
		self.read_cmd().await
	}

	/// Send data without waiting for a response. Every send must be matched by a
	/// [Self::read_cmd] before the connection is reused.
	pub async fn send(&mut self, data: Data<'_>) -> Result<()> {
		self.pending += 1;
		if let Err(err) = self.framed.send(data).await {
			self.broken = true;
			return Err(err.into());
		}

		Ok(())
	}

	/// Read a single response. Error replies become [Error::Redis] and leave the connection
	/// usable.
	pub async fn read_cmd(&mut self) -> Result<Data<'static>> {
		match self.framed.try_next().await {
			Ok(Some(reply)) => {
				self.pending = self.pending.saturating_sub(1);
				reply.map_err(|err| Error::Redis(err.0))
			}
			Ok(None) => {
				self.broken = true;
				Err(Error::ConnectionClosed)
			}
			Err(err) => {
				self.broken = true;
				Err(err.into())
			}
		}
	}

	/// Whether this connection must be discarded instead of reused.
	pub fn is_broken(&self) -> bool {
		self.broken || self.pending > 0
	}
}
