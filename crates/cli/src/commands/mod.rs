mod credential_process;
mod login;

use crate::cli::{Commands, LoginArgs};
use crate::context::CommandContext;
use crate::error::Result;

pub async fn dispatch(command: Option<Commands>, login: LoginArgs, ctx: &CommandContext) -> Result<()> {
	match command {
		None => login::execute(&login, ctx).await,
		Some(Commands::CredentialProcess { role_arn, region }) => credential_process::execute(&role_arn, &region, ctx).await,
	}
}
