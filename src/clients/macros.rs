/// Generate client methods with oneshot channel boilerplate and automatic tracing.
///
/// Channel failures mean the service task is gone and surface as
/// [`CartError::Unavailable`](crate::error::CartError::Unavailable).
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty
        as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(
                &self,
                $($param: $param_type),*
            ) -> Result<$return_type, $crate::error::CartError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| {
                        $crate::error::CartError::Unavailable("cart service closed".to_string())
                    })?;

                response
                    .await
                    .map_err(|_| {
                        let reason = "cart service dropped the request".to_string();
                        $crate::error::CartError::Unavailable(reason)
                    })?
            }
        }
    };
}
