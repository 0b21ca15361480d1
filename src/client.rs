use tracing::{debug, warn};

use crate::commands::{
    describe_completion_code, Command, GetDcmiConfigParams, GetDcmiConfigParamsResponse,
    GetPayloadActivationStatus, GetPayloadActivationStatusResponse, GetSystemBootOptions,
    GetSystemBootOptionsResponse, Response, SetDcmiConfigParams, SetSystemBootOptions,
};
use crate::errors::ExchangeError;
use crate::params::boot::{BiosBootType, BootDeviceSelector};
use crate::params::dcmi::{
    ActivateDhcp, DhcpTiming1, DhcpTiming2, DhcpTiming3, DiscoveryConfiguration,
};
use crate::params::{
    BootOptionParameterSelector, DcmiConfig, DcmiConfigParamSelector, DcmiConfigParameter,
    Parameter, Selector,
};
use crate::protocol::{IpmiCommand, PayloadType};
use crate::transport::Transport;

/// Encodes requests, hands them to a [Transport] and decodes the answers
pub struct Client<T: Transport> {
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Client { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Sends a command and decodes its response
    ///
    /// A non-zero completion code fails with
    /// [ExchangeError::CompletionCode], described from the response's table.
    pub fn exchange<C: Command>(
        &mut self,
        ctx: &T::Context,
        request: &C,
    ) -> Result<C::Response, ExchangeError> {
        let command = request.command();
        let payload = request.encode_request();

        debug!(
            command = %command,
            net_fn = command.net_fn() as u8,
            code = command.code(),
            request = ?payload,
            "sending request"
        );

        let raw = self.transport.exchange(ctx, command, &payload)?;

        debug!(
            command = %command,
            completion_code = raw.completion_code,
            len = raw.data.len(),
            "received response"
        );

        if raw.completion_code != 0x00 {
            let description = describe_completion_code::<C::Response>(raw.completion_code);
            warn!(
                command = %command,
                completion_code = raw.completion_code,
                %description,
                "command failed"
            );
            return Err(ExchangeError::CompletionCode {
                command,
                code: raw.completion_code,
                description,
            });
        }

        C::Response::decode_response_payload(&raw.data)
            .map_err(|source| ExchangeError::Decode { command, source })
    }

    /// Sets one boot option parameter
    pub fn set_system_boot_options(
        &mut self,
        ctx: &T::Context,
        request: &SetSystemBootOptions,
    ) -> Result<(), ExchangeError> {
        self.exchange(ctx, request).map(|_| ())
    }

    /// Sets the boot device for the next boot.
    ///
    /// `persist` of false applies to the next boot only, true to all future boots.
    pub fn set_boot_device(
        &mut self,
        ctx: &T::Context,
        device: BootDeviceSelector,
        boot_type: BiosBootType,
        persist: bool,
    ) -> Result<(), ExchangeError> {
        let request = SetSystemBootOptions::boot_device(device, boot_type, persist);
        self.set_system_boot_options(ctx, &request)
    }

    pub fn get_system_boot_options(
        &mut self,
        ctx: &T::Context,
        selector: BootOptionParameterSelector,
    ) -> Result<GetSystemBootOptionsResponse, ExchangeError> {
        self.exchange(ctx, &GetSystemBootOptions::new(selector))
    }

    /// Reads boot option parameter `P`
    pub fn get_boot_option_for<P>(&mut self, ctx: &T::Context) -> Result<P, ExchangeError>
    where
        P: Parameter<Selector = BootOptionParameterSelector>,
    {
        let response = self.get_system_boot_options(ctx, P::SELECTOR)?;
        response.parameter::<P>().map_err(|source| ExchangeError::Decode {
            command: IpmiCommand::GetSystemBootOptions,
            source,
        })
    }

    pub fn get_payload_activation_status(
        &mut self,
        ctx: &T::Context,
        payload_type: PayloadType,
    ) -> Result<GetPayloadActivationStatusResponse, ExchangeError> {
        let mut response = self.exchange(ctx, &GetPayloadActivationStatus(payload_type))?;
        response.payload_type = Some(payload_type);
        Ok(response)
    }

    pub fn get_dcmi_config_params(
        &mut self,
        ctx: &T::Context,
        selector: DcmiConfigParamSelector,
        set_selector: u8,
    ) -> Result<GetDcmiConfigParamsResponse, ExchangeError> {
        let request = GetDcmiConfigParams {
            selector,
            set_selector,
        };
        self.exchange(ctx, &request)
    }

    /// Reads DCMI configuration parameter `P` and decodes it.
    ///
    /// A decode failure names the parameter's selector.
    pub fn get_dcmi_config_param_for<P>(&mut self, ctx: &T::Context) -> Result<P, ExchangeError>
    where
        P: Parameter<Selector = DcmiConfigParamSelector>,
    {
        let response = self.get_dcmi_config_params(ctx, P::SELECTOR, 0)?;
        P::decode_for_selector(&response.param_data).map_err(|source| ExchangeError::Decode {
            command: IpmiCommand::GetDcmiConfigParams,
            source,
        })
    }

    /// Writes one DCMI configuration parameter
    pub fn set_dcmi_config_param(
        &mut self,
        ctx: &T::Context,
        parameter: impl Into<DcmiConfigParameter>,
    ) -> Result<(), ExchangeError> {
        self.exchange(ctx, &SetDcmiConfigParams::new(parameter))
            .map(|_| ())
    }

    /// Reads the DHCP related DCMI configuration.
    ///
    /// Parameters are read one after another and the first failure aborts
    /// the whole fetch.
    pub fn get_dcmi_configurations(&mut self, ctx: &T::Context) -> Result<DcmiConfig, ExchangeError> {
        let activate_dhcp = self.fetch_dcmi_param::<ActivateDhcp>(ctx)?;
        let discovery_configuration = self.fetch_dcmi_param::<DiscoveryConfiguration>(ctx)?;
        let dhcp_timing_1 = self.fetch_dcmi_param::<DhcpTiming1>(ctx)?;
        let dhcp_timing_2 = self.fetch_dcmi_param::<DhcpTiming2>(ctx)?;
        let dhcp_timing_3 = self.fetch_dcmi_param::<DhcpTiming3>(ctx)?;

        Ok(DcmiConfig {
            activate_dhcp,
            discovery_configuration,
            dhcp_timing_1,
            dhcp_timing_2,
            dhcp_timing_3,
        })
    }

    fn fetch_dcmi_param<P>(&mut self, ctx: &T::Context) -> Result<P, ExchangeError>
    where
        P: Parameter<Selector = DcmiConfigParamSelector>,
    {
        debug!(parameter = P::SELECTOR.name(), "fetching DCMI configuration parameter");
        self.get_dcmi_config_param_for::<P>(ctx)
            .map_err(|source| ExchangeError::Parameter {
                name: P::SELECTOR.name(),
                source: Box::new(source),
            })
    }
}
